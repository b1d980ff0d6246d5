//! Rule engine
//!
//! Evaluates the active rule set, in priority order, against one
//! evaluation context. Conditions within a rule are combined with
//! logical AND. All rules are always evaluated; only the global
//! blacklist short-circuit (upstream of this engine) skips them, so
//! trigger statistics and triggered-rule lists stay complete.

use crate::condition::evaluate_condition;
use crate::context::EvaluationContext;
use riskgate_core::{FraudRule, RiskAction};

/// Aggregated result of evaluating the rule set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Sum of `risk_score_impact` over triggered rules
    pub score_delta: u32,

    /// Names of triggered rules, in evaluation order
    pub triggered: Vec<String>,

    /// IDs of triggered rules, for trigger-counter increments
    pub triggered_ids: Vec<String>,

    /// True when any triggered rule requested `block`
    pub block_requested: bool,

    /// True when any triggered rule requested `review`
    pub review_requested: bool,
}

/// Stateless evaluator over a rule snapshot
pub struct RuleEngine;

impl RuleEngine {
    /// Evaluate every active rule against the context
    ///
    /// `rules` is expected ordered by priority descending (the rule
    /// repository's contract); inactive rules are skipped defensively.
    pub fn evaluate(rules: &[FraudRule], ctx: &EvaluationContext) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        for rule in rules {
            if !rule.is_active {
                continue;
            }

            if rule.conditions.is_empty() {
                // Vacuous truth: a rule with no conditions always
                // triggers. Logged so misconfigured rules are visible.
                tracing::debug!(rule = %rule.id, "rule has no conditions, triggering vacuously");
            }

            let triggered = rule
                .conditions
                .iter()
                .all(|condition| evaluate_condition(condition, ctx));

            if !triggered {
                continue;
            }

            tracing::debug!(
                rule = %rule.id,
                impact = rule.risk_score_impact,
                action = %rule.action,
                "rule triggered"
            );

            outcome.score_delta += u32::from(rule.risk_score_impact);
            outcome.triggered.push(rule.name.clone());
            outcome.triggered_ids.push(rule.id.clone());

            match rule.action {
                RiskAction::Block => outcome.block_requested = true,
                RiskAction::Review => outcome.review_requested = true,
                RiskAction::Allow => {}
            }
        }

        outcome
    }
}
