//! Evaluation context
//!
//! Rule conditions reference fields by dotted path. The context holds
//! the flattened input record in two namespaces, `transaction` and
//! `risk_profile`, and resolves lookups with graceful handling: a
//! missing field is `Value::Null`, never an error.

use chrono::{DateTime, Utc};
use riskgate_core::{RiskProfile, Value};
use std::collections::HashMap;

/// Flattened input record for one evaluation
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    transaction: HashMap<String, Value>,
    risk_profile: HashMap<String, Value>,
}

impl EvaluationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a transaction field
    pub fn set_transaction_field(&mut self, key: impl Into<String>, value: Value) {
        self.transaction.insert(key.into(), value);
    }

    /// Populate the `transaction` namespace from the request fields
    #[allow(clippy::too_many_arguments)]
    pub fn with_transaction(
        mut self,
        email: &str,
        ip_address: &str,
        amount: f64,
        currency: &str,
        country_code: Option<&str>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        self.transaction.insert("email".to_string(), Value::from(email));
        self.transaction
            .insert("ip_address".to_string(), Value::from(ip_address));
        self.transaction.insert("amount".to_string(), Value::Number(amount));
        self.transaction
            .insert("currency".to_string(), Value::from(currency));
        self.transaction.insert(
            "country_code".to_string(),
            country_code.map_or(Value::Null, Value::from),
        );
        self.transaction.insert(
            "hour_of_day".to_string(),
            Value::Number(f64::from(hour_of_day(occurred_at))),
        );
        self
    }

    /// Populate the `risk_profile` namespace from the stored profile
    pub fn with_profile(mut self, profile: &RiskProfile) -> Self {
        self.risk_profile.insert(
            "risk_score".to_string(),
            Value::Number(f64::from(profile.risk_score)),
        );
        self.risk_profile.insert(
            "risk_level".to_string(),
            Value::String(profile.risk_level.to_string()),
        );
        self.risk_profile
            .insert("is_blocked".to_string(), Value::Bool(profile.is_blocked));
        self.risk_profile.insert(
            "average_amount".to_string(),
            profile
                .behavioral_baseline
                .average_amount
                .map_or(Value::Null, Value::Number),
        );
        self.risk_profile.insert(
            "sample_count".to_string(),
            Value::Number(profile.behavioral_baseline.sample_count as f64),
        );
        self
    }

    /// Load a field value by dotted path
    ///
    /// Supports paths like:
    /// - transaction.amount
    /// - risk_profile.risk_score
    /// - amount (unprefixed, resolved against the transaction namespace)
    ///
    /// Returns `Value::Null` if the field is not found
    pub fn load_field(&self, path: &str) -> Value {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.is_empty() || segments[0].is_empty() {
            tracing::debug!("Empty field path, returning Null");
            return Value::Null;
        }

        let (namespace_data, remaining) = match segments[0] {
            "transaction" => (&self.transaction, &segments[1..]),
            "risk_profile" => (&self.risk_profile, &segments[1..]),
            // Unprefixed paths resolve against the transaction record
            _ => (&self.transaction, &segments[..]),
        };

        if remaining.is_empty() {
            return Value::Object(namespace_data.clone());
        }

        let Some(mut current) = namespace_data.get(remaining[0]) else {
            tracing::debug!("Field not found: {}, returning Null", path);
            return Value::Null;
        };

        for segment in &remaining[1..] {
            match current {
                Value::Object(map) => {
                    let Some(next) = map.get(*segment) else {
                        tracing::debug!("Nested field not found: {}, returning Null", segment);
                        return Value::Null;
                    };
                    current = next;
                }
                _ => {
                    tracing::debug!("Cannot navigate into {:?} at {}, returning Null", current, segment);
                    return Value::Null;
                }
            }
        }

        current.clone()
    }
}

/// UTC hour-of-day for a timestamp
pub fn hour_of_day(ts: DateTime<Utc>) -> u8 {
    use chrono::Timelike;
    ts.hour() as u8
}
