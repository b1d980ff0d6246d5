//! Alert records for high-risk outcomes
//!
//! Alerts are immutable once created; only human review changes their
//! status afterwards.

use crate::profile::RiskLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Medium,
    High,
    Critical,
}

/// Review status of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Pending,
    Reviewed,
    FalsePositive,
}

/// Immutable record of a high-risk evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert ID
    pub id: Uuid,

    /// Identity the alert concerns
    pub email: String,

    /// IP address at the time of the alert
    pub ip_address: String,

    /// Classifier for downstream routing (e.g. "blacklist_match")
    pub alert_type: String,

    /// Severity band
    pub severity: AlertSeverity,

    /// Risk score at the time of the alert
    pub risk_score: u8,

    /// Risk level at the time of the alert
    pub risk_level: RiskLevel,

    /// Names of the rules and markers that fired
    pub triggered_rules: Vec<String>,

    /// Human-readable summary
    pub description: String,

    /// Review status, pending until a human looks at it
    pub status: AlertStatus,

    /// When the alert was created
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Create a pending alert with a fresh ID
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        email: impl Into<String>,
        ip_address: impl Into<String>,
        alert_type: impl Into<String>,
        severity: AlertSeverity,
        risk_score: u8,
        triggered_rules: Vec<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            ip_address: ip_address.into(),
            alert_type: alert_type.into(),
            severity,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            triggered_rules,
            description: description.into(),
            status: AlertStatus::Pending,
            created_at: now,
        }
    }
}
