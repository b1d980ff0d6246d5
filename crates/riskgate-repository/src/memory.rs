//! In-memory repository backends
//!
//! Used by tests and by single-process deployments that do not need a
//! durable store. Every mutation happens under a single writer lock, so
//! profile saves and trigger increments are atomic per operation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use riskgate_core::{
    Alert, DeviceFingerprint, FraudRule, ListEntry, ListEntryType, ListKind, RiskProfile,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::{
    AlertSink, DeviceRepository, ListRepository, ProfileRepository, ProfileUpdate, RuleRepository,
    TransactionHistory,
};

/// In-memory rule store
#[derive(Default)]
pub struct MemoryRuleRepository {
    rules: Arc<RwLock<HashMap<String, FraudRule>>>,
}

impl MemoryRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a rule
    pub async fn put_rule(&self, rule: FraudRule) {
        self.rules.write().await.insert(rule.id.clone(), rule);
    }

    /// Fetch a rule by ID (test observation)
    pub async fn get_rule(&self, rule_id: &str) -> Option<FraudRule> {
        self.rules.read().await.get(rule_id).cloned()
    }
}

#[async_trait]
impl RuleRepository for MemoryRuleRepository {
    async fn active_rules(&self) -> RepositoryResult<Vec<FraudRule>> {
        let rules = self.rules.read().await;
        let mut active: Vec<FraudRule> = rules.values().filter(|r| r.is_active).cloned().collect();
        active.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
        Ok(active)
    }

    async fn increment_trigger(&self, rule_id: &str) -> RepositoryResult<()> {
        let mut rules = self.rules.write().await;
        let rule = rules
            .get_mut(rule_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("rule '{}'", rule_id)))?;
        rule.times_triggered += 1;
        Ok(())
    }
}

/// In-memory list store
#[derive(Default)]
pub struct MemoryListRepository {
    entries: Arc<RwLock<Vec<ListEntry>>>,
}

impl MemoryListRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListRepository for MemoryListRepository {
    async fn has_active_entry(
        &self,
        kind: ListKind,
        entry_type: ListEntryType,
        value: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<bool> {
        let entries = self.entries.read().await;
        Ok(entries.iter().any(|e| {
            e.kind == kind
                && e.entry_type == entry_type
                && e.value.eq_ignore_ascii_case(value)
                && e.is_active_at(now)
        }))
    }

    async fn add_entry(&self, entry: ListEntry) -> RepositoryResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn deactivate_entries(
        &self,
        kind: ListKind,
        entry_type: ListEntryType,
        value: &str,
    ) -> RepositoryResult<u64> {
        let mut entries = self.entries.write().await;
        let mut deactivated = 0;
        for entry in entries.iter_mut() {
            if entry.kind == kind
                && entry.entry_type == entry_type
                && entry.value.eq_ignore_ascii_case(value)
                && entry.is_active
            {
                entry.is_active = false;
                deactivated += 1;
            }
        }
        Ok(deactivated)
    }
}

/// In-memory profile store
///
/// `update_profile` applies its mutation while holding the writer
/// lock, so concurrent same-identity updates serialize instead of
/// overwriting each other. `set_unavailable` simulates a backend
/// outage.
#[derive(Default)]
pub struct MemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<String, RiskProfile>>>,
    unavailable: AtomicBool,
}

impl MemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a profile without creating it (test observation)
    pub async fn get(&self, email: &str) -> Option<RiskProfile> {
        self.profiles.read().await.get(email).cloned()
    }

    /// Toggle simulated outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "profile store down".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn get_or_create(&self, email: &str, now: DateTime<Utc>) -> RepositoryResult<RiskProfile> {
        self.check_available()?;
        let mut profiles = self.profiles.write().await;
        Ok(profiles
            .entry(email.to_string())
            .or_insert_with(|| RiskProfile::new(email, now))
            .clone())
    }

    async fn update_profile(
        &self,
        email: &str,
        now: DateTime<Utc>,
        apply: ProfileUpdate,
    ) -> RepositoryResult<RiskProfile> {
        self.check_available()?;
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(email.to_string())
            .or_insert_with(|| RiskProfile::new(email, now));
        apply(profile);
        Ok(profile.clone())
    }

    async fn save_profile(&self, profile: &RiskProfile) -> RepositoryResult<()> {
        self.check_available()?;
        self.profiles
            .write()
            .await
            .insert(profile.email.clone(), profile.clone());
        Ok(())
    }
}

/// One stored transaction, for velocity counting
#[derive(Debug, Clone)]
struct HistoryRecord {
    email: String,
    amount: f64,
    occurred_at: DateTime<Utc>,
}

/// In-memory transaction history
///
/// Seedable for tests; `set_unavailable` simulates a history backend
/// outage so degraded-mode behavior can be exercised.
#[derive(Default)]
pub struct MemoryTransactionHistory {
    records: Arc<RwLock<Vec<HistoryRecord>>>,
    unavailable: AtomicBool,
}

impl MemoryTransactionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a past transaction
    pub async fn record(&self, email: &str, amount: f64, occurred_at: DateTime<Utc>) {
        self.records.write().await.push(HistoryRecord {
            email: email.to_string(),
            amount,
            occurred_at,
        });
    }

    /// Toggle simulated outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "transaction history reader down".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionHistory for MemoryTransactionHistory {
    async fn count_recent(
        &self,
        email: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RepositoryResult<u64> {
        self.check_available()?;
        let cutoff = now - window;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.email == email && r.occurred_at > cutoff && r.occurred_at <= now)
            .count() as u64)
    }

    async fn count_recent_above(
        &self,
        email: &str,
        min_amount: f64,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RepositoryResult<u64> {
        self.check_available()?;
        let cutoff = now - window;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| {
                r.email == email
                    && r.amount > min_amount
                    && r.occurred_at > cutoff
                    && r.occurred_at <= now
            })
            .count() as u64)
    }
}

/// In-memory alert sink
#[derive(Default)]
pub struct MemoryAlertSink {
    alerts: Arc<RwLock<Vec<Alert>>>,
}

impl MemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded alerts (test observation)
    pub async fn alerts(&self) -> Vec<Alert> {
        self.alerts.read().await.clone()
    }
}

#[async_trait]
impl AlertSink for MemoryAlertSink {
    async fn create_alert(&self, alert: Alert) -> RepositoryResult<()> {
        tracing::info!(
            email = %alert.email,
            severity = ?alert.severity,
            score = alert.risk_score,
            "alert recorded"
        );
        self.alerts.write().await.push(alert);
        Ok(())
    }
}

/// In-memory device fingerprint store, keyed by fingerprint hash
#[derive(Default)]
pub struct MemoryDeviceRepository {
    devices: Arc<RwLock<HashMap<String, DeviceFingerprint>>>,
}

impl MemoryDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a fingerprint record (test observation)
    pub async fn get(&self, fingerprint_hash: &str) -> Option<DeviceFingerprint> {
        self.devices.read().await.get(fingerprint_hash).cloned()
    }
}

#[async_trait]
impl DeviceRepository for MemoryDeviceRepository {
    async fn observe(
        &self,
        fingerprint_hash: &str,
        email: &str,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<DeviceFingerprint> {
        let mut devices = self.devices.write().await;
        let record = devices
            .entry(fingerprint_hash.to_string())
            .and_modify(|fp| fp.touch(email, ip_address, now))
            .or_insert_with(|| DeviceFingerprint::first_seen(fingerprint_hash, email, ip_address, now));
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskgate_core::{Condition, Operator, RiskAction, Value};

    #[tokio::test]
    async fn test_active_rules_ordered_by_priority() {
        let repo = MemoryRuleRepository::new();
        repo.put_rule(FraudRule::new("low", "Low", RiskAction::Allow, 5).with_priority(1))
            .await;
        repo.put_rule(FraudRule::new("high", "High", RiskAction::Review, 30).with_priority(10))
            .await;
        repo.put_rule(
            FraudRule::new("off", "Off", RiskAction::Block, 90)
                .with_priority(99)
                .deactivated(),
        )
        .await;

        let active = repo.active_rules().await.unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, "high");
        assert_eq!(active[1].id, "low");
    }

    #[tokio::test]
    async fn test_increment_trigger() {
        let repo = MemoryRuleRepository::new();
        repo.put_rule(
            FraudRule::new("r1", "R1", RiskAction::Review, 10).add_condition(Condition::new(
                "transaction.amount",
                Operator::Gt,
                Value::Number(100.0),
            )),
        )
        .await;

        repo.increment_trigger("r1").await.unwrap();
        repo.increment_trigger("r1").await.unwrap();
        assert_eq!(repo.get_rule("r1").await.unwrap().times_triggered, 2);

        assert!(repo.increment_trigger("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_list_repository_expiry() {
        let now = Utc::now();
        let repo = MemoryListRepository::new();
        repo.add_entry(
            ListEntry::new(
                ListKind::Blacklist,
                ListEntryType::Email,
                "fraud@test.com",
                "abuse",
                now,
            )
            .with_expiry(now - Duration::minutes(5)),
        )
        .await
        .unwrap();

        // Expired entries never match
        assert!(!repo
            .has_active_entry(ListKind::Blacklist, ListEntryType::Email, "fraud@test.com", now)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_list_repository_case_insensitive_value() {
        let now = Utc::now();
        let repo = MemoryListRepository::new();
        repo.add_entry(ListEntry::new(
            ListKind::Blacklist,
            ListEntryType::Email,
            "Fraud@Test.com",
            "abuse",
            now,
        ))
        .await
        .unwrap();

        assert!(repo
            .has_active_entry(ListKind::Blacklist, ListEntryType::Email, "fraud@test.com", now)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_deactivate_entries() {
        let now = Utc::now();
        let repo = MemoryListRepository::new();
        repo.add_entry(ListEntry::new(
            ListKind::Blacklist,
            ListEntryType::Email,
            "bad@test.com",
            "abuse",
            now,
        ))
        .await
        .unwrap();

        let count = repo
            .deactivate_entries(ListKind::Blacklist, ListEntryType::Email, "bad@test.com")
            .await
            .unwrap();
        assert_eq!(count, 1);

        assert!(!repo
            .has_active_entry(ListKind::Blacklist, ListEntryType::Email, "bad@test.com", now)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_profile_get_or_create() {
        let now = Utc::now();
        let repo = MemoryProfileRepository::new();

        let first = repo.get_or_create("a@test.com", now).await.unwrap();
        assert_eq!(first.risk_score, 0);

        let mut updated = first.clone();
        updated.set_score(42);
        repo.save_profile(&updated).await.unwrap();

        let second = repo.get_or_create("a@test.com", now).await.unwrap();
        assert_eq!(second.risk_score, 42);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_update_profile_concurrent_updates_all_land() {
        let now = Utc::now();
        let repo = Arc::new(MemoryProfileRepository::new());

        let mut handles = Vec::new();
        for i in 0..8u32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.update_profile(
                    "a@test.com",
                    now,
                    Box::new(move |profile| {
                        profile.behavioral_baseline.observe(100.0 * f64::from(i + 1), 10);
                    }),
                )
                .await
                .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every observation folded in, none lost to interleaving
        let profile = repo.get("a@test.com").await.unwrap();
        assert_eq!(profile.behavioral_baseline.sample_count, 8);
    }

    #[tokio::test]
    async fn test_update_profile_creates_on_first_sight() {
        let now = Utc::now();
        let repo = MemoryProfileRepository::new();

        let updated = repo
            .update_profile("new@test.com", now, Box::new(|profile| profile.set_score(40)))
            .await
            .unwrap();
        assert_eq!(updated.risk_score, 40);
        assert_eq!(repo.get("new@test.com").await.unwrap().risk_score, 40);
    }

    #[tokio::test]
    async fn test_profile_store_unavailable() {
        let repo = MemoryProfileRepository::new();
        repo.set_unavailable(true);

        let err = repo.get_or_create("a@test.com", Utc::now()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));

        let err = repo
            .update_profile("a@test.com", Utc::now(), Box::new(|profile| profile.set_score(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_history_window_counts() {
        let now = Utc::now();
        let history = MemoryTransactionHistory::new();
        history.record("a@test.com", 100.0, now - Duration::minutes(2)).await;
        history.record("a@test.com", 600.0, now - Duration::minutes(8)).await;
        history.record("a@test.com", 700.0, now - Duration::minutes(45)).await;
        history.record("b@test.com", 100.0, now - Duration::minutes(1)).await;

        let ten_min = history
            .count_recent("a@test.com", Duration::minutes(10), now)
            .await
            .unwrap();
        assert_eq!(ten_min, 2);

        let large = history
            .count_recent_above("a@test.com", 500.0, Duration::minutes(60), now)
            .await
            .unwrap();
        assert_eq!(large, 2);
    }

    #[tokio::test]
    async fn test_history_unavailable() {
        let history = MemoryTransactionHistory::new();
        history.set_unavailable(true);
        let err = history
            .count_recent("a@test.com", Duration::minutes(10), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_device_observe_upserts() {
        let now = Utc::now();
        let repo = MemoryDeviceRepository::new();

        let first = repo.observe("hash1", "a@test.com", "1.2.3.4", now).await.unwrap();
        assert_eq!(first.seen_count, 1);

        let later = now + Duration::hours(2);
        let second = repo.observe("hash1", "a@test.com", "5.6.7.8", later).await.unwrap();
        assert_eq!(second.seen_count, 2);
        assert_eq!(second.first_seen_at, now);
        assert_eq!(second.ip_address, "5.6.7.8");
    }
}
