//! Velocity and pattern analyzer integration tests

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{request, TestHarness};
use riskgate_core::{RiskAction, RiskProfile};
use riskgate_repository::ProfileRepository;

#[tokio::test]
async fn test_burst_velocity_scores_and_marks() {
    // 4 transactions in the last 10 minutes, 5th arriving now:
    // velocity contributes +25 and the marker is reported
    let now = Utc::now();
    let harness = TestHarness::new();
    for i in 1..=4 {
        harness
            .history
            .record("a@test.com", 50.0, now - Duration::minutes(i))
            .await;
    }

    let response = harness
        .engine
        .analyze_transaction(request(50.0).with_occurred_at(now))
        .await
        .unwrap();

    assert_eq!(response.decision.risk_score, 25);
    assert!(response
        .decision
        .triggered_rules
        .contains(&"velocity".to_string()));
}

#[tokio::test]
async fn test_velocity_checks_are_additive() {
    let now = Utc::now();
    let harness = TestHarness::new();
    // 4 recent large transactions: both checks fire
    for i in 1..=4 {
        harness
            .history
            .record("a@test.com", 800.0, now - Duration::minutes(i))
            .await;
    }

    let response = harness
        .engine
        .analyze_transaction(request(800.0).with_occurred_at(now))
        .await
        .unwrap();

    assert_eq!(response.decision.risk_score, 45);
    assert!(response
        .decision
        .triggered_rules
        .contains(&"large_amount_velocity".to_string()));
}

#[tokio::test]
async fn test_history_outage_degrades_to_zero() {
    let now = Utc::now();
    let harness = TestHarness::new();
    for i in 1..=4 {
        harness
            .history
            .record("a@test.com", 800.0, now - Duration::minutes(i))
            .await;
    }
    harness.history.set_unavailable(true);

    // The evaluation still produces a decision; velocity contributes zero
    let response = harness
        .engine
        .analyze_transaction(request(800.0).with_occurred_at(now))
        .await
        .unwrap();

    assert_eq!(response.decision.risk_score, 0);
    assert_eq!(response.decision.action, RiskAction::Allow);
}

#[tokio::test]
async fn test_amount_pattern_anomaly() {
    let now = Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap();
    let harness = TestHarness::new();

    // Seed a profile whose baseline is 100 at hour 10
    let mut profile = RiskProfile::new("a@test.com", now);
    profile.behavioral_baseline.observe(100.0, 10);
    harness.profiles.save_profile(&profile).await.unwrap();

    // 500 deviates 4x from the 100 average
    let response = harness
        .engine
        .analyze_transaction(request(500.0).with_occurred_at(now))
        .await
        .unwrap();

    assert_eq!(response.decision.risk_score, 15);
    assert!(response
        .decision
        .triggered_rules
        .contains(&"amount_pattern_anomaly".to_string()));
}

#[tokio::test]
async fn test_time_pattern_anomaly() {
    let daytime = Utc.with_ymd_and_hms(2026, 8, 20, 14, 0, 0).unwrap();
    let nighttime = Utc.with_ymd_and_hms(2026, 8, 21, 3, 0, 0).unwrap();
    let harness = TestHarness::new();

    let mut profile = RiskProfile::new("a@test.com", daytime);
    profile.behavioral_baseline.observe(100.0, 14);
    harness.profiles.save_profile(&profile).await.unwrap();

    let response = harness
        .engine
        .analyze_transaction(request(100.0).with_occurred_at(nighttime))
        .await
        .unwrap();

    assert_eq!(response.decision.risk_score, 10);
    assert!(response
        .decision
        .triggered_rules
        .contains(&"time_pattern_anomaly".to_string()));
}

#[tokio::test]
async fn test_first_seen_identity_has_no_pattern_signal() {
    let harness = TestHarness::new();

    // No baseline yet: pattern contributes zero regardless of amount
    let response = harness
        .engine
        .analyze_transaction(request(1_000_000.0))
        .await
        .unwrap();

    assert_eq!(response.decision.risk_score, 0);
    assert_eq!(response.decision.action, RiskAction::Allow);
}

#[tokio::test]
async fn test_baseline_learns_across_evaluations() {
    let hour_ten = Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap();
    let harness = TestHarness::new();

    harness
        .engine
        .analyze_transaction(request(100.0).with_occurred_at(hour_ten))
        .await
        .unwrap();
    harness
        .engine
        .analyze_transaction(request(200.0).with_occurred_at(hour_ten))
        .await
        .unwrap();

    let profile = harness.profiles.get("a@test.com").await.unwrap();
    assert_eq!(profile.behavioral_baseline.sample_count, 2);
    assert_eq!(profile.behavioral_baseline.average_amount, Some(150.0));
    assert!(profile.behavioral_baseline.typical_hours.contains(&10));
}
