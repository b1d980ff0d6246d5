//! Condition evaluation
//!
//! Evaluates a single typed condition against the flattened input
//! record. Evaluation is fail-closed: an unknown operator, a type
//! mismatch, or a comparison that cannot be meaningfully performed
//! evaluates to false rather than raising, so one bad rule cannot
//! abort the evaluation of others.

use crate::context::EvaluationContext;
use riskgate_core::{Condition, Operator, Value};

/// Evaluate one condition against the context
pub fn evaluate_condition(condition: &Condition, ctx: &EvaluationContext) -> bool {
    let actual = ctx.load_field(&condition.field);
    let expected = &condition.value;

    let result = match condition.operator {
        Operator::Eq => values_equal(&actual, expected),
        Operator::Ne => !values_equal(&actual, expected),
        Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => {
            compare_ordering(&actual, condition.operator, expected)
        }
        Operator::In => membership(&actual, expected),
        Operator::NotIn => !membership(&actual, expected),
        Operator::Contains => contains(&actual, expected),
        Operator::Regex => regex_match(&actual, expected),
        Operator::Unknown => {
            tracing::warn!(field = %condition.field, "Unknown operator, condition evaluates false");
            false
        }
    };

    tracing::debug!(
        field = %condition.field,
        operator = ?condition.operator,
        ?actual,
        result,
        "condition evaluated"
    );
    result
}

/// Loose equality across value types
///
/// Null equals only Null; `!=` against a missing field is therefore
/// true while `=` is false.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => left == right,
    }
}

/// Ordering comparison over numbers, with string fallback for ordinal
/// values; anything else is false
fn compare_ordering(left: &Value, op: Operator, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match op {
            Operator::Gt => l > r,
            Operator::Ge => l >= r,
            Operator::Lt => l < r,
            Operator::Le => l <= r,
            _ => false,
        },
        (Value::String(l), Value::String(r)) => match op {
            Operator::Gt => l > r,
            Operator::Ge => l >= r,
            Operator::Lt => l < r,
            Operator::Le => l <= r,
            _ => false,
        },
        _ => false,
    }
}

/// Membership against a value treated as a set
fn membership(needle: &Value, haystack: &Value) -> bool {
    match haystack {
        Value::Array(items) => items.iter().any(|item| values_equal(needle, item)),
        // A scalar set is treated as a one-element set
        other => values_equal(needle, other),
    }
}

/// Case-insensitive substring test
fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(haystack), Value::String(needle)) => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => false,
    }
}

/// Regex match against the field's string value
///
/// An invalid pattern is a configuration error and evaluates false.
fn regex_match(actual: &Value, pattern: &Value) -> bool {
    let (Value::String(text), Value::String(pattern)) = (actual, pattern) else {
        return false;
    };

    match regex::Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(e) => {
            tracing::warn!(%pattern, error = %e, "Invalid regex in rule condition");
            false
        }
    }
}
