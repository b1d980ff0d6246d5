//! Fraud rule and condition definitions
//!
//! Rules are data, not code: operators author them at runtime and the
//! engine interprets them. The `Operator` enum keeps the dispatch
//! exhaustive at compile time while leaving the rule set editable
//! without a redeploy.

use crate::decision::RiskAction;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Condition operators supported by the evaluator
///
/// An operator the engine does not recognize deserializes to `Unknown`
/// and always evaluates false, so one malformed rule cannot abort the
/// evaluation of others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equal (=)
    #[serde(rename = "=", alias = "eq")]
    Eq,
    /// Not equal (!=)
    #[serde(rename = "!=", alias = "ne")]
    Ne,
    /// Greater than (>)
    #[serde(rename = ">", alias = "gt")]
    Gt,
    /// Greater than or equal (>=)
    #[serde(rename = ">=", alias = "ge")]
    Ge,
    /// Less than (<)
    #[serde(rename = "<", alias = "lt")]
    Lt,
    /// Less than or equal (<=)
    #[serde(rename = "<=", alias = "le")]
    Le,
    /// Membership (element in array)
    In,
    /// Negated membership
    NotIn,
    /// Case-insensitive substring test
    Contains,
    /// Regex match against the field's string value
    Regex,
    /// Operator not recognized by this engine version
    #[serde(other)]
    Unknown,
}

/// A single typed condition: `field operator value`
///
/// `field` is a dotted path into the evaluation context
/// (e.g. `transaction.amount`, `risk_profile.risk_score`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Field path resolved against the flattened input record
    pub field: String,

    /// Comparison operator
    pub operator: Operator,

    /// Value to compare against
    pub value: Value,
}

impl Condition {
    /// Create a new condition
    pub fn new(field: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

/// An operator-authored fraud rule
///
/// Conditions are combined with logical AND. Rules are never deleted,
/// only deactivated; `times_triggered` is the only field the engine
/// mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRule {
    /// Unique rule ID
    pub id: String,

    /// Human-readable name (reported in triggered-rule lists)
    pub name: String,

    /// Evaluation priority, higher first
    pub priority: i32,

    /// Conditions that must all hold for the rule to trigger
    pub conditions: Vec<Condition>,

    /// Enforcement action this rule requests when triggered
    pub action: RiskAction,

    /// Score added to the running total when triggered (0-100)
    pub risk_score_impact: u8,

    /// Inactive rules are skipped entirely
    pub is_active: bool,

    /// How many times this rule has triggered (engine-maintained)
    #[serde(default)]
    pub times_triggered: u64,

    /// Feedback metric, updated externally by review outcomes
    #[serde(default)]
    pub accuracy_rate: f64,
}

impl FraudRule {
    /// Create a new active rule
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        action: RiskAction,
        risk_score_impact: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority: 0,
            conditions: Vec::new(),
            action,
            risk_score_impact,
            is_active: true,
            times_triggered: 0,
            accuracy_rate: 0.0,
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add a condition
    pub fn add_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Replace the condition list
    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Deactivate the rule
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}
