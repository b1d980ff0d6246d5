//! Behavioral pattern analysis
//!
//! Compares the current transaction against the identity's stored
//! baseline. Absent baseline data contributes zero: the analyzer
//! cannot evaluate what was never observed.

use crate::signal::SignalOutcome;
use riskgate_core::BehavioralBaseline;

/// Score added when the amount deviates from the baseline mean
const AMOUNT_ANOMALY_SCORE: u32 = 15;

/// Score added when the transaction falls outside typical hours
const TIME_ANOMALY_SCORE: u32 = 10;

/// Relative deviation from the mean above which the amount is anomalous
const AMOUNT_DEVIATION_RATIO: f64 = 3.0;

/// Marker for amount deviation
pub const AMOUNT_ANOMALY_MARKER: &str = "amount_pattern_anomaly";

/// Marker for off-hours activity
pub const TIME_ANOMALY_MARKER: &str = "time_pattern_anomaly";

/// Stateless baseline-deviation analyzer
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    /// Score the current transaction against the baseline
    ///
    /// `hour` is the UTC hour-of-day of the transaction.
    pub fn analyze(baseline: &BehavioralBaseline, amount: f64, hour: u8) -> SignalOutcome {
        let mut outcome = SignalOutcome::none();

        if let Some(average) = baseline.average_amount.filter(|avg| *avg > 0.0) {
            let deviation = (amount - average).abs() / average;
            if deviation > AMOUNT_DEVIATION_RATIO {
                tracing::debug!(amount, average, deviation, "amount pattern anomaly");
                outcome.add(AMOUNT_ANOMALY_SCORE, AMOUNT_ANOMALY_MARKER);
            }
        }

        if !baseline.typical_hours.is_empty() && !baseline.typical_hours.contains(&(hour % 24)) {
            tracing::debug!(hour, "time pattern anomaly");
            outcome.add(TIME_ANOMALY_SCORE, TIME_ANOMALY_MARKER);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_with(average: f64, samples: u64, hours: &[u8]) -> BehavioralBaseline {
        BehavioralBaseline {
            average_amount: Some(average),
            sample_count: samples,
            typical_hours: hours.iter().copied().collect(),
        }
    }

    #[test]
    fn test_amount_anomaly() {
        let baseline = baseline_with(100.0, 10, &[9, 10, 11]);

        // 500 is 4x the 100 average: relative deviation 4.0 > 3.0
        let outcome = PatternAnalyzer::analyze(&baseline, 500.0, 10);
        assert_eq!(outcome.score_delta, 15);
        assert_eq!(outcome.markers, vec![AMOUNT_ANOMALY_MARKER]);
    }

    #[test]
    fn test_amount_within_tolerance() {
        let baseline = baseline_with(100.0, 10, &[9]);

        // 3x deviation is the boundary, not over it
        let outcome = PatternAnalyzer::analyze(&baseline, 400.0, 9);
        assert_eq!(outcome.score_delta, 0);
    }

    #[test]
    fn test_time_anomaly() {
        let baseline = baseline_with(100.0, 10, &[9, 10, 11]);

        let outcome = PatternAnalyzer::analyze(&baseline, 100.0, 3);
        assert_eq!(outcome.score_delta, 10);
        assert_eq!(outcome.markers, vec![TIME_ANOMALY_MARKER]);
    }

    #[test]
    fn test_both_anomalies() {
        let baseline = baseline_with(100.0, 10, &[9]);

        let outcome = PatternAnalyzer::analyze(&baseline, 1000.0, 3);
        assert_eq!(outcome.score_delta, 25);
        assert_eq!(
            outcome.markers,
            vec![AMOUNT_ANOMALY_MARKER, TIME_ANOMALY_MARKER]
        );
    }

    #[test]
    fn test_empty_baseline_contributes_zero() {
        let baseline = BehavioralBaseline::default();

        let outcome = PatternAnalyzer::analyze(&baseline, 1_000_000.0, 3);
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.markers.is_empty());
    }

    #[test]
    fn test_hour_wraps_to_day_range() {
        let baseline = baseline_with(100.0, 5, &[1]);
        // 25 wraps to hour 1, which is typical
        let outcome = PatternAnalyzer::analyze(&baseline, 100.0, 25);
        assert_eq!(outcome.score_delta, 0);
    }
}
