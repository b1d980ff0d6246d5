//! Core FraudEngine implementation
//!
//! Pipeline per transaction: list gate (blacklist short-circuits) →
//! rule engine → velocity analyzer → pattern analyzer → decision
//! policy → profile update → conditional alert. The engine is invoked
//! synchronously once per transaction and holds no state of its own
//! beyond configuration; all persistence goes through the injected
//! repositories.

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::types::{AnalysisResponse, TransactionRequest};
use chrono::{DateTime, Utc};
use riskgate_core::{Alert, AlertSeverity, ListEntry, ListEntryType, ListKind, RiskDecision, RiskProfile};
use riskgate_engine::context::hour_of_day;
use riskgate_engine::lists::IdentitySignals;
use riskgate_engine::{
    DecisionPolicy, EvaluationContext, ListGate, PatternAnalyzer, RuleEngine, VelocityAnalyzer,
};
use riskgate_repository::{
    AlertSink, DeviceRepository, ListRepository, ProfileRepository, RuleRepository,
    TransactionHistory,
};
use std::sync::Arc;

/// The fraud risk decision engine
pub struct FraudEngine {
    pub(crate) rules: Arc<dyn RuleRepository>,
    pub(crate) lists: Arc<dyn ListRepository>,
    pub(crate) profiles: Arc<dyn ProfileRepository>,
    pub(crate) history: Arc<dyn TransactionHistory>,
    pub(crate) alerts: Arc<dyn AlertSink>,
    pub(crate) devices: Option<Arc<dyn DeviceRepository>>,
    pub(crate) velocity: VelocityAnalyzer,
    pub(crate) policy: DecisionPolicy,
}

impl FraudEngine {
    /// Generate a unique request ID
    /// Format: req_YYYYMMDDHHmmss_xxxxxx
    fn generate_request_id() -> String {
        use rand::Rng;

        let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let random: u32 = rand::thread_rng().gen_range(0..0xFFFFFF);

        format!("req_{}_{:06x}", datetime_str, random)
    }

    /// Analyze one prospective transaction
    ///
    /// Always produces a decision unless the request violates the
    /// input contract (empty email or IP). Repository outages degrade
    /// (zero analyzer contribution, skipped persistence) rather than
    /// failing the evaluation.
    pub async fn analyze_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<AnalysisResponse> {
        if request.email.trim().is_empty() {
            return Err(SdkError::InvalidRequest("email must not be empty".to_string()));
        }
        if request.ip_address.trim().is_empty() {
            return Err(SdkError::InvalidRequest(
                "ip_address must not be empty".to_string(),
            ));
        }

        let now = request.occurred_at.unwrap_or_else(Utc::now);
        let request_id = Self::generate_request_id();
        let identity = IdentitySignals {
            email: &request.email,
            ip_address: &request.ip_address,
            country_code: request.country_code.as_deref(),
        };

        tracing::debug!(
            request_id = %request_id,
            email = %request.email,
            amount = request.amount,
            "analyzing transaction"
        );

        let decision = if ListGate::is_blacklisted(self.lists.as_ref(), identity, now).await {
            // Conclusive signal: no further analyzers run
            let decision = self.policy.blacklisted_decision();
            self.emit_alert(
                &request,
                &decision,
                "blacklist_match",
                AlertSeverity::Critical,
                now,
            )
            .await;
            decision
        } else {
            self.evaluate(&request, identity, now).await
        };

        self.persist_profile(&request, &decision, now).await;
        self.observe_device(&request, now).await;

        tracing::info!(
            request_id = %request_id,
            email = %request.email,
            score = decision.risk_score,
            action = %decision.action,
            "transaction analyzed"
        );

        Ok(AnalysisResponse {
            request_id,
            decision,
            evaluated_at: now,
            metadata: request.metadata,
        })
    }

    /// Durably block an identity: profile flags plus a blacklist entry,
    /// so the block holds at the list gate as well
    pub async fn block_identity(
        &self,
        email: &str,
        reason: &str,
        until: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let now = Utc::now();
        self.profiles
            .update_profile(email, now, Box::new(move |profile| profile.block(until)))
            .await?;

        let mut entry = ListEntry::new(ListKind::Blacklist, ListEntryType::Email, email, reason, now);
        if let Some(until) = until {
            entry = entry.with_expiry(until);
        }
        self.lists.add_entry(entry).await?;

        tracing::info!(%email, %reason, ?until, "identity blocked");
        Ok(())
    }

    /// Unblock an identity: clear block flags, deactivate the blacklist
    /// entry, and halve (not zero) the stored score
    pub async fn unblock_identity(&self, email: &str) -> Result<()> {
        let now = Utc::now();
        let profile = self
            .profiles
            .update_profile(email, now, Box::new(|profile| profile.unblock()))
            .await?;

        let deactivated = self
            .lists
            .deactivate_entries(ListKind::Blacklist, ListEntryType::Email, email)
            .await?;

        tracing::info!(%email, deactivated, score = profile.risk_score, "identity unblocked");
        Ok(())
    }

    /// Run the non-blacklisted evaluation path
    ///
    /// Infallible: every repository outage degrades to a zero or
    /// default contribution, never an aborted evaluation.
    async fn evaluate(
        &self,
        request: &TransactionRequest,
        identity: IdentitySignals<'_>,
        now: DateTime<Utc>,
    ) -> RiskDecision {
        let whitelisted = ListGate::is_whitelisted(self.lists.as_ref(), identity, now).await;

        // Profile store down: evaluate against a fresh profile so the
        // remaining analyzers still produce a decision
        let profile = match self.profiles.get_or_create(&request.email, now).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(email = %request.email, error = %e, "profile store unavailable, evaluating against a fresh profile");
                RiskProfile::new(&request.email, now)
            }
        };

        let ctx = EvaluationContext::new()
            .with_transaction(
                &request.email,
                &request.ip_address,
                request.amount,
                &request.currency,
                request.country_code.as_deref(),
                now,
            )
            .with_profile(&profile);

        let rule_snapshot = match self.rules.active_rules().await {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!(error = %e, "rule repository unavailable, evaluating with no rules");
                Vec::new()
            }
        };
        let rule_outcome = RuleEngine::evaluate(&rule_snapshot, &ctx);

        // Trigger counters are statistics, not decision inputs; a
        // failed increment is logged and skipped
        for rule_id in &rule_outcome.triggered_ids {
            if let Err(e) = self.rules.increment_trigger(rule_id).await {
                tracing::warn!(rule = %rule_id, error = %e, "failed to increment trigger counter");
            }
        }

        let velocity_outcome = self
            .velocity
            .analyze(self.history.as_ref(), &request.email, now)
            .await;

        let pattern_outcome = PatternAnalyzer::analyze(
            &profile.behavioral_baseline,
            request.amount,
            hour_of_day(now),
        );

        let decision = self.policy.decide(
            whitelisted,
            &rule_outcome,
            &velocity_outcome,
            &pattern_outcome,
        );

        if let Some(severity) = self.policy.alert_severity(decision.risk_score) {
            self.emit_alert(request, &decision, "high_risk_transaction", severity, now)
                .await;
        }

        decision
    }

    /// Persist the decision into the profile: score, level, identity
    /// signals, last activity, and the behavioral baseline. Applied as
    /// one atomic update so concurrent same-identity evaluations never
    /// drop each other's writes; a failing profile store degrades with
    /// a warning since the decision is already made.
    async fn persist_profile(
        &self,
        request: &TransactionRequest,
        decision: &RiskDecision,
        now: DateTime<Utc>,
    ) {
        let score = u32::from(decision.risk_score);
        let ip = request.ip_address.clone();
        let country = request.country_code.clone();
        let amount = request.amount;
        let hour = hour_of_day(now);

        let update = self
            .profiles
            .update_profile(
                &request.email,
                now,
                Box::new(move |profile| {
                    profile.set_score(score);
                    profile.last_ip = Some(ip);
                    profile.last_country = country;
                    profile.last_activity_at = Some(now);
                    profile.behavioral_baseline.observe(amount, hour);
                }),
            )
            .await;

        if let Err(e) = update {
            tracing::warn!(email = %request.email, error = %e, "failed to persist risk profile");
        }
    }

    /// Record an alert; a failing sink degrades with a warning since
    /// the evaluation must still return a usable decision
    async fn emit_alert(
        &self,
        request: &TransactionRequest,
        decision: &RiskDecision,
        alert_type: &str,
        severity: AlertSeverity,
        now: DateTime<Utc>,
    ) {
        let alert = Alert::new(
            &request.email,
            &request.ip_address,
            alert_type,
            severity,
            decision.risk_score,
            decision.triggered_rules.clone(),
            format!(
                "Transaction of {} {} scored {} ({})",
                request.amount, request.currency, decision.risk_score, decision.action
            ),
            now,
        );

        if let Err(e) = self.alerts.create_alert(alert).await {
            tracing::warn!(email = %request.email, error = %e, "failed to record alert");
        }
    }

    /// Store the device fingerprint observation, if one was supplied
    async fn observe_device(&self, request: &TransactionRequest, now: DateTime<Utc>) {
        let (Some(devices), Some(hash)) = (&self.devices, &request.device_fingerprint) else {
            return;
        };

        if let Err(e) = devices
            .observe(hash, &request.email, &request.ip_address, now)
            .await
        {
            tracing::warn!(email = %request.email, error = %e, "failed to record device fingerprint");
        }
    }
}

/// Internal constructor used by the builder
pub(crate) fn build_engine(
    config: &EngineConfig,
    rules: Arc<dyn RuleRepository>,
    lists: Arc<dyn ListRepository>,
    profiles: Arc<dyn ProfileRepository>,
    history: Arc<dyn TransactionHistory>,
    alerts: Arc<dyn AlertSink>,
    devices: Option<Arc<dyn DeviceRepository>>,
) -> FraudEngine {
    FraudEngine {
        rules,
        lists,
        profiles,
        history,
        alerts,
        devices,
        velocity: VelocityAnalyzer::new(config.velocity_config()),
        policy: DecisionPolicy::new(config.policy_config()),
    }
}
