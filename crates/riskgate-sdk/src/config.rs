//! Configuration types for FraudEngine

use riskgate_engine::{PolicyConfig, VelocityConfig};
use serde::{Deserialize, Serialize};

/// Main engine configuration
///
/// Every tunable defaults to the production values; tests and
/// deployments override individual knobs through the builder-style
/// setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scores at or above this require review
    pub review_threshold: u8,

    /// Scores at or above this are blocked
    pub block_threshold: u8,

    /// Score subtracted for a whitelisted identity
    pub whitelist_adjustment: u32,

    /// Burst velocity window, minutes
    pub burst_window_minutes: i64,

    /// Burst check fires when the short-window count exceeds this
    pub burst_threshold: u64,

    /// Large-amount velocity window, minutes
    pub large_amount_window_minutes: i64,

    /// Large-amount check fires when the count exceeds this
    pub large_amount_threshold: u64,

    /// Only transactions above this amount count toward the
    /// large-amount check
    pub large_amount_cutoff: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            review_threshold: 50,
            block_threshold: 80,
            whitelist_adjustment: 20,
            burst_window_minutes: 10,
            burst_threshold: 3,
            large_amount_window_minutes: 60,
            large_amount_threshold: 2,
            large_amount_cutoff: 500.0,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the review threshold
    pub fn with_review_threshold(mut self, threshold: u8) -> Self {
        self.review_threshold = threshold;
        self
    }

    /// Set the block threshold
    pub fn with_block_threshold(mut self, threshold: u8) -> Self {
        self.block_threshold = threshold;
        self
    }

    /// Set the whitelist score adjustment
    pub fn with_whitelist_adjustment(mut self, adjustment: u32) -> Self {
        self.whitelist_adjustment = adjustment;
        self
    }

    /// Set the burst velocity threshold
    pub fn with_burst_threshold(mut self, threshold: u64) -> Self {
        self.burst_threshold = threshold;
        self
    }

    /// Set the large-amount velocity threshold and cutoff
    pub fn with_large_amount_check(mut self, threshold: u64, cutoff: f64) -> Self {
        self.large_amount_threshold = threshold;
        self.large_amount_cutoff = cutoff;
        self
    }

    pub(crate) fn policy_config(&self) -> PolicyConfig {
        PolicyConfig {
            review_threshold: self.review_threshold,
            block_threshold: self.block_threshold,
            whitelist_adjustment: self.whitelist_adjustment,
        }
    }

    pub(crate) fn velocity_config(&self) -> VelocityConfig {
        VelocityConfig {
            burst_window: chrono::Duration::minutes(self.burst_window_minutes),
            burst_threshold: self.burst_threshold,
            large_amount_window: chrono::Duration::minutes(self.large_amount_window_minutes),
            large_amount_threshold: self.large_amount_threshold,
            large_amount_cutoff: self.large_amount_cutoff,
        }
    }
}
