//! Risk decision types returned to the caller

use crate::profile::RiskLevel;
use serde::{Deserialize, Serialize};

/// Enforcement action for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAction {
    /// Let the transaction proceed
    Allow,
    /// Queue for human review
    Review,
    /// Reject the transaction
    Block,
}

impl std::fmt::Display for RiskAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskAction::Allow => write!(f, "allow"),
            RiskAction::Review => write!(f, "review"),
            RiskAction::Block => write!(f, "block"),
        }
    }
}

/// The outcome of one transaction analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDecision {
    /// Final risk score, clamped to 0-100
    pub risk_score: u8,

    /// Banded classification of the score
    pub risk_level: RiskLevel,

    /// Enforcement action
    pub action: RiskAction,

    /// Names of rules and analyzer markers that fired
    pub triggered_rules: Vec<String>,

    /// Human-readable follow-up guidance
    pub recommendations: Vec<String>,

    /// True when the decision is a hard block
    pub should_block: bool,

    /// True when the decision lands in the review band
    pub requires_review: bool,
}

impl RiskDecision {
    /// An allow decision with no signals
    pub fn allow() -> Self {
        Self {
            risk_score: 0,
            risk_level: RiskLevel::Low,
            action: RiskAction::Allow,
            triggered_rules: Vec::new(),
            recommendations: Vec::new(),
            should_block: false,
            requires_review: false,
        }
    }
}
