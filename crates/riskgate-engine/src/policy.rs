//! Decision policy
//!
//! Combines the list-gate result with the rule, velocity, and pattern
//! contributions into a final score, level, and action. The summation
//! happens in exactly one place so each analyzer's contribution stays
//! independently auditable.
//!
//! The two-tier thresholds (50 for review, 80 for block) create a
//! review band: medium-confidence signals queue for human judgment
//! instead of auto-blocking.

use crate::rules::RuleOutcome;
use crate::signal::SignalOutcome;
use riskgate_core::{AlertSeverity, RiskAction, RiskDecision, RiskLevel};

/// Marker recorded when a whitelist entry softened the score
pub const WHITELISTED_MARKER: &str = "whitelisted";

/// Decision thresholds
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Scores at or above this require review
    pub review_threshold: u8,

    /// Scores at or above this are blocked
    pub block_threshold: u8,

    /// Score subtracted for a whitelisted identity
    pub whitelist_adjustment: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            review_threshold: 50,
            block_threshold: 80,
            whitelist_adjustment: 20,
        }
    }
}

/// Threshold-driven decision combiner
pub struct DecisionPolicy {
    config: PolicyConfig,
}

impl DecisionPolicy {
    /// Create a policy with the given thresholds
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// The conclusive decision for a blacklisted identity
    ///
    /// Hard override: score 100, blocked, no other signal considered.
    pub fn blacklisted_decision(&self) -> RiskDecision {
        RiskDecision {
            risk_score: 100,
            risk_level: RiskLevel::Blocked,
            action: RiskAction::Block,
            triggered_rules: vec!["blacklist".to_string()],
            recommendations: vec![
                "Identity is blacklisted; reject the transaction".to_string(),
            ],
            should_block: true,
            requires_review: false,
        }
    }

    /// Combine analyzer outcomes into the final decision
    pub fn decide(
        &self,
        whitelisted: bool,
        rules: &RuleOutcome,
        velocity: &SignalOutcome,
        pattern: &SignalOutcome,
    ) -> RiskDecision {
        // The single, explicit summation
        let raw = rules.score_delta + velocity.score_delta + pattern.score_delta;
        let adjusted = if whitelisted {
            raw.saturating_sub(self.config.whitelist_adjustment)
        } else {
            raw
        };
        let score = adjusted.min(100) as u8;

        let mut triggered = Vec::new();
        if whitelisted {
            triggered.push(WHITELISTED_MARKER.to_string());
        }
        triggered.extend(rules.triggered.iter().cloned());
        triggered.extend(velocity.markers.iter().cloned());
        triggered.extend(pattern.markers.iter().cloned());

        let should_block = score >= self.config.block_threshold || rules.block_requested;
        let requires_review =
            !should_block && (score >= self.config.review_threshold || rules.review_requested);

        let action = if should_block {
            RiskAction::Block
        } else if requires_review {
            RiskAction::Review
        } else {
            RiskAction::Allow
        };

        let recommendations = self.recommendations(action, velocity, pattern);

        RiskDecision {
            risk_score: score,
            risk_level: RiskLevel::from_score(score),
            action,
            triggered_rules: triggered,
            recommendations,
            should_block,
            requires_review,
        }
    }

    /// Alert severity for a final score, if the score warrants an alert
    pub fn alert_severity(&self, score: u8) -> Option<AlertSeverity> {
        if score >= self.config.block_threshold {
            Some(AlertSeverity::High)
        } else if score >= self.config.review_threshold {
            Some(AlertSeverity::Medium)
        } else {
            None
        }
    }

    fn recommendations(
        &self,
        action: RiskAction,
        velocity: &SignalOutcome,
        pattern: &SignalOutcome,
    ) -> Vec<String> {
        let mut recs = Vec::new();
        match action {
            RiskAction::Block => {
                recs.push("Block the transaction and review recent account activity".to_string());
            }
            RiskAction::Review => {
                recs.push("Queue the transaction for manual review".to_string());
            }
            RiskAction::Allow => {}
        }
        if !velocity.markers.is_empty() {
            recs.push("Monitor transaction frequency for this identity".to_string());
        }
        if !pattern.markers.is_empty() {
            recs.push("Verify the transaction with the account holder".to_string());
        }
        recs
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}
