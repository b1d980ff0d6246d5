//! Velocity analysis
//!
//! Counts recent transactions per identity within fixed time windows
//! and converts counts into score contributions. Windows are computed
//! on demand from stored history through the `TransactionHistory`
//! port.
//!
//! If the history reader is down, velocity contributes zero rather
//! than aborting: an evaluation must always produce a usable decision.

use crate::signal::SignalOutcome;
use chrono::{DateTime, Duration, Utc};
use riskgate_repository::TransactionHistory;

/// Score added when the short-window burst check fires
const VELOCITY_SCORE: u32 = 25;

/// Score added when the large-amount frequency check fires
const LARGE_AMOUNT_VELOCITY_SCORE: u32 = 20;

/// Marker for the burst check
pub const VELOCITY_MARKER: &str = "velocity";

/// Marker for the large-amount frequency check
pub const LARGE_AMOUNT_VELOCITY_MARKER: &str = "large_amount_velocity";

/// Velocity thresholds; windows are fixed, thresholds and the amount
/// cutoff are tunable
#[derive(Debug, Clone)]
pub struct VelocityConfig {
    /// Short burst window
    pub burst_window: Duration,

    /// Burst check fires when the short-window count exceeds this
    pub burst_threshold: u64,

    /// Window for the large-amount frequency check
    pub large_amount_window: Duration,

    /// Large-amount check fires when the count exceeds this
    pub large_amount_threshold: u64,

    /// Only transactions above this amount count toward the
    /// large-amount check
    pub large_amount_cutoff: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            burst_window: Duration::minutes(10),
            burst_threshold: 3,
            large_amount_window: Duration::minutes(60),
            large_amount_threshold: 2,
            large_amount_cutoff: 500.0,
        }
    }
}

/// Velocity analyzer over the transaction history port
pub struct VelocityAnalyzer {
    config: VelocityConfig,
}

impl VelocityAnalyzer {
    /// Create an analyzer with the given thresholds
    pub fn new(config: VelocityConfig) -> Self {
        Self { config }
    }

    /// Run both velocity checks for an identity
    ///
    /// The two checks are independent and additive.
    pub async fn analyze(
        &self,
        history: &dyn TransactionHistory,
        email: &str,
        now: DateTime<Utc>,
    ) -> SignalOutcome {
        let mut outcome = SignalOutcome::none();

        match history.count_recent(email, self.config.burst_window, now).await {
            Ok(count) if count > self.config.burst_threshold => {
                tracing::debug!(%email, count, "burst velocity check fired");
                outcome.add(VELOCITY_SCORE, VELOCITY_MARKER);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(%email, error = %e, "history reader unavailable, velocity degraded to zero");
                return outcome;
            }
        }

        match history
            .count_recent_above(email, self.config.large_amount_cutoff, self.config.large_amount_window, now)
            .await
        {
            Ok(count) if count > self.config.large_amount_threshold => {
                tracing::debug!(%email, count, "large-amount velocity check fired");
                outcome.add(LARGE_AMOUNT_VELOCITY_SCORE, LARGE_AMOUNT_VELOCITY_MARKER);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(%email, error = %e, "history reader unavailable, large-amount velocity degraded to zero");
            }
        }

        outcome
    }
}

impl Default for VelocityAnalyzer {
    fn default() -> Self {
        Self::new(VelocityConfig::default())
    }
}
