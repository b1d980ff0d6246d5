//! Per-identity risk profile
//!
//! One profile per identity, keyed by email. Profiles are created on
//! first sight, mutated after every evaluation, and never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Banded classification of a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Blocked,
}

impl RiskLevel {
    /// The single home for the 30/60/80 score banding
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => RiskLevel::Blocked,
            60..=79 => RiskLevel::High,
            30..=59 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Blocked => write!(f, "blocked"),
        }
    }
}

/// Behavioral baseline: a small statistics summary of past activity
///
/// Absent data contributes nothing to pattern analysis; a baseline only
/// speaks for what it has observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BehavioralBaseline {
    /// Running mean of observed transaction amounts
    pub average_amount: Option<f64>,

    /// Number of observations folded into the mean
    pub sample_count: u64,

    /// Hours of day (UTC) this identity has been active in
    pub typical_hours: BTreeSet<u8>,
}

impl BehavioralBaseline {
    /// Fold one observation into the baseline
    pub fn observe(&mut self, amount: f64, hour: u8) {
        self.sample_count += 1;
        let mean = self.average_amount.unwrap_or(0.0);
        self.average_amount = Some(mean + (amount - mean) / self.sample_count as f64);
        self.typical_hours.insert(hour % 24);
    }

    /// True when the baseline has amount data to compare against
    pub fn has_amount_data(&self) -> bool {
        self.average_amount.is_some() && self.sample_count > 0
    }
}

/// Per-identity running risk state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Primary identity key
    pub email: String,

    /// Last IP address seen for this identity
    pub last_ip: Option<String>,

    /// Last country seen for this identity
    pub last_country: Option<String>,

    /// Running risk score, always within 0-100
    pub risk_score: u8,

    /// Banded level, kept consistent with `risk_score`
    pub risk_level: RiskLevel,

    /// Hard-block flag set by the identity lifecycle operations
    pub is_blocked: bool,

    /// When a temporary block lapses, if one is set
    pub blocked_until: Option<DateTime<Utc>>,

    /// Behavioral baseline for pattern analysis
    pub behavioral_baseline: BehavioralBaseline,

    /// Timestamp of the most recent evaluation
    pub last_activity_at: Option<DateTime<Utc>>,

    /// When the profile was first created
    pub created_at: DateTime<Utc>,
}

impl RiskProfile {
    /// Create a fresh profile for a first-seen identity
    pub fn new(email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            last_ip: None,
            last_country: None,
            risk_score: 0,
            risk_level: RiskLevel::Low,
            is_blocked: false,
            blocked_until: None,
            behavioral_baseline: BehavioralBaseline::default(),
            last_activity_at: None,
            created_at: now,
        }
    }

    /// Set the score, clamping to 0-100 and re-deriving the level
    pub fn set_score(&mut self, score: u32) {
        self.risk_score = score.min(100) as u8;
        self.risk_level = RiskLevel::from_score(self.risk_score);
    }

    /// Apply a hard block until the given time (or indefinitely)
    pub fn block(&mut self, until: Option<DateTime<Utc>>) {
        self.risk_score = 100;
        self.risk_level = RiskLevel::Blocked;
        self.is_blocked = true;
        self.blocked_until = until;
    }

    /// Clear block flags and halve the score; trust is rebuilt, not reset
    pub fn unblock(&mut self) {
        self.is_blocked = false;
        self.blocked_until = None;
        self.set_score(u32::from(self.risk_score) / 2);
    }
}
