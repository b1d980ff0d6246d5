//! Request/Response types for FraudEngine

use chrono::{DateTime, Utc};
use riskgate_core::RiskDecision;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One prospective transaction to analyze
///
/// Email and IP are required identity fields; geolocation and device
/// signals are assumed pre-resolved by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Primary identity key
    pub email: String,

    /// Source IP address
    pub ip_address: String,

    /// Transaction amount
    pub amount: f64,

    /// ISO currency code
    pub currency: String,

    /// Pre-resolved ISO country code, if known
    #[serde(default)]
    pub country_code: Option<String>,

    /// Client device fingerprint hash, if collected
    #[serde(default)]
    pub device_fingerprint: Option<String>,

    /// Transaction time; defaults to now at analysis time
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,

    /// Request metadata (echoed back on the response)
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl TransactionRequest {
    /// Create a request with the required fields
    pub fn new(
        email: impl Into<String>,
        ip_address: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            ip_address: ip_address.into(),
            amount,
            currency: currency.into(),
            country_code: None,
            device_fingerprint: None,
            occurred_at: None,
            metadata: HashMap::new(),
        }
    }

    /// Set the pre-resolved country code
    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    /// Attach a device fingerprint hash
    pub fn with_device_fingerprint(mut self, hash: impl Into<String>) -> Self {
        self.device_fingerprint = Some(hash.into());
        self
    }

    /// Override the transaction time (tests, replays)
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Analysis response: the decision plus request bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Request ID (for tracking and correlation)
    pub request_id: String,

    /// The risk decision
    pub decision: RiskDecision,

    /// When the evaluation ran
    pub evaluated_at: DateTime<Utc>,

    /// Request metadata (echoed back)
    pub metadata: HashMap<String, String>,
}
