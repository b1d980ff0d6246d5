//! Riskgate Engine - evaluation runtime for the fraud decision engine
//!
//! Provides the analyzers that turn one transaction plus stored state
//! into a risk decision: condition evaluator, rule engine, list gate,
//! velocity and pattern analyzers, and the decision policy that
//! combines their explicit score contributions.

pub mod condition;
pub mod context;
pub mod lists;
pub mod pattern;
pub mod policy;
pub mod rules;
pub mod signal;
pub mod velocity;

pub use condition::evaluate_condition;
pub use context::EvaluationContext;
pub use lists::ListGate;
pub use pattern::PatternAnalyzer;
pub use policy::{DecisionPolicy, PolicyConfig};
pub use rules::{RuleEngine, RuleOutcome};
pub use signal::SignalOutcome;
pub use velocity::{VelocityAnalyzer, VelocityConfig};
