//! Riskgate Core - Core types and definitions for the riskgate fraud
//! decision engine
//!
//! This crate provides the fundamental types used across the riskgate
//! ecosystem:
//! - Value types for runtime data
//! - Rule and condition definitions
//! - Risk profile, list entry, alert, and decision types

pub mod alert;
pub mod decision;
pub mod device;
pub mod list;
pub mod profile;
pub mod rule;
pub mod types;

// Re-export commonly used types
pub use alert::{Alert, AlertSeverity, AlertStatus};
pub use decision::{RiskAction, RiskDecision};
pub use device::DeviceFingerprint;
pub use list::{ListEntry, ListEntryType, ListKind};
pub use profile::{BehavioralBaseline, RiskLevel, RiskProfile};
pub use rule::{Condition, FraudRule, Operator};
pub use types::Value;
