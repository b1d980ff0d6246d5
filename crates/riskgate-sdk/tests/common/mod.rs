//! Common test utilities for SDK integration tests

// Not every test binary uses every helper
#![allow(dead_code)]

use riskgate_core::{Condition, FraudRule, ListEntry, Operator, RiskAction, Value};
use riskgate_repository::{
    ListRepository, MemoryAlertSink, MemoryDeviceRepository, MemoryListRepository,
    MemoryProfileRepository, MemoryRuleRepository, MemoryTransactionHistory,
};
use riskgate_sdk::{EngineConfig, FraudEngine, FraudEngineBuilder, TransactionRequest};
use std::sync::Arc;

/// Test harness: a FraudEngine over in-memory repositories with the
/// backends kept accessible for seeding and observation
pub struct TestHarness {
    pub engine: FraudEngine,
    pub rules: Arc<MemoryRuleRepository>,
    pub lists: Arc<MemoryListRepository>,
    pub profiles: Arc<MemoryProfileRepository>,
    pub history: Arc<MemoryTransactionHistory>,
    pub alerts: Arc<MemoryAlertSink>,
    pub devices: Arc<MemoryDeviceRepository>,
}

impl TestHarness {
    /// Build a harness with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Build a harness with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let rules = Arc::new(MemoryRuleRepository::new());
        let lists = Arc::new(MemoryListRepository::new());
        let profiles = Arc::new(MemoryProfileRepository::new());
        let history = Arc::new(MemoryTransactionHistory::new());
        let alerts = Arc::new(MemoryAlertSink::new());
        let devices = Arc::new(MemoryDeviceRepository::new());

        let engine = FraudEngineBuilder::new()
            .with_config(config)
            .with_rule_repository(rules.clone())
            .with_list_repository(lists.clone())
            .with_profile_repository(profiles.clone())
            .with_transaction_history(history.clone())
            .with_alert_sink(alerts.clone())
            .with_device_repository(devices.clone())
            .build()
            .expect("harness engine builds");

        Self {
            engine,
            rules,
            lists,
            profiles,
            history,
            alerts,
            devices,
        }
    }

    /// Seed a rule
    pub async fn seed_rule(&self, rule: FraudRule) {
        self.rules.put_rule(rule).await;
    }

    /// Seed a list entry
    pub async fn seed_list_entry(&self, entry: ListEntry) {
        self.lists.add_entry(entry).await.expect("entry stored");
    }
}

/// A rule that reviews amounts above a threshold
pub fn high_amount_rule(threshold: f64, impact: u8) -> FraudRule {
    FraudRule::new("high_amount", "High Amount", RiskAction::Review, impact)
        .with_priority(10)
        .add_condition(Condition::new(
            "transaction.amount",
            Operator::Gt,
            Value::Number(threshold),
        ))
}

/// A baseline request for `a@test.com`
pub fn request(amount: f64) -> TransactionRequest {
    TransactionRequest::new("a@test.com", "203.0.113.9", amount, "USD")
}
