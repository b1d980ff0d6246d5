//! Builder pattern for FraudEngine

use crate::config::EngineConfig;
use crate::engine::{build_engine, FraudEngine};
use crate::error::{Result, SdkError};
use riskgate_repository::{
    AlertSink, DeviceRepository, ListRepository, MemoryAlertSink, MemoryListRepository,
    MemoryProfileRepository, MemoryRuleRepository, MemoryTransactionHistory, ProfileRepository,
    RuleRepository, TransactionHistory,
};
use std::sync::Arc;

/// Builder for FraudEngine
///
/// # Example
///
/// ```rust,ignore
/// use riskgate_sdk::{EngineConfig, FraudEngineBuilder};
///
/// // In-memory storage (tests, single process)
/// let engine = FraudEngineBuilder::new()
///     .with_config(EngineConfig::default())
///     .with_memory_repositories()
///     .build()?;
///
/// // Custom backends
/// let engine = FraudEngineBuilder::new()
///     .with_rule_repository(my_rules)
///     .with_list_repository(my_lists)
///     .with_profile_repository(my_profiles)
///     .with_transaction_history(my_history)
///     .with_alert_sink(my_alerts)
///     .build()?;
/// ```
#[derive(Default)]
pub struct FraudEngineBuilder {
    config: EngineConfig,
    rules: Option<Arc<dyn RuleRepository>>,
    lists: Option<Arc<dyn ListRepository>>,
    profiles: Option<Arc<dyn ProfileRepository>>,
    history: Option<Arc<dyn TransactionHistory>>,
    alerts: Option<Arc<dyn AlertSink>>,
    devices: Option<Arc<dyn DeviceRepository>>,
}

impl FraudEngineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the rule repository
    pub fn with_rule_repository(mut self, rules: Arc<dyn RuleRepository>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Set the list repository
    pub fn with_list_repository(mut self, lists: Arc<dyn ListRepository>) -> Self {
        self.lists = Some(lists);
        self
    }

    /// Set the profile repository
    pub fn with_profile_repository(mut self, profiles: Arc<dyn ProfileRepository>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Set the transaction history reader
    pub fn with_transaction_history(mut self, history: Arc<dyn TransactionHistory>) -> Self {
        self.history = Some(history);
        self
    }

    /// Set the alert sink
    pub fn with_alert_sink(mut self, alerts: Arc<dyn AlertSink>) -> Self {
        self.alerts = Some(alerts);
        self
    }

    /// Set the optional device fingerprint store
    pub fn with_device_repository(mut self, devices: Arc<dyn DeviceRepository>) -> Self {
        self.devices = Some(devices);
        self
    }

    /// Fill every unset repository with a fresh in-memory backend
    pub fn with_memory_repositories(mut self) -> Self {
        if self.rules.is_none() {
            self.rules = Some(Arc::new(MemoryRuleRepository::new()));
        }
        if self.lists.is_none() {
            self.lists = Some(Arc::new(MemoryListRepository::new()));
        }
        if self.profiles.is_none() {
            self.profiles = Some(Arc::new(MemoryProfileRepository::new()));
        }
        if self.history.is_none() {
            self.history = Some(Arc::new(MemoryTransactionHistory::new()));
        }
        if self.alerts.is_none() {
            self.alerts = Some(Arc::new(MemoryAlertSink::new()));
        }
        self
    }

    /// Build the engine; every non-optional repository must be set
    pub fn build(self) -> Result<FraudEngine> {
        let rules = self
            .rules
            .ok_or_else(|| SdkError::ConfigError("rule repository not set".to_string()))?;
        let lists = self
            .lists
            .ok_or_else(|| SdkError::ConfigError("list repository not set".to_string()))?;
        let profiles = self
            .profiles
            .ok_or_else(|| SdkError::ConfigError("profile repository not set".to_string()))?;
        let history = self
            .history
            .ok_or_else(|| SdkError::ConfigError("transaction history not set".to_string()))?;
        let alerts = self
            .alerts
            .ok_or_else(|| SdkError::ConfigError("alert sink not set".to_string()))?;

        Ok(build_engine(
            &self.config,
            rules,
            lists,
            profiles,
            history,
            alerts,
            self.devices,
        ))
    }
}
