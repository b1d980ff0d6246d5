//! Riskgate SDK
//!
//! High-level API for analyzing transactions against the fraud risk
//! decision engine: wire up repositories with the builder, then call
//! [`FraudEngine::analyze_transaction`] once per prospective
//! transaction.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod types;

// Re-export main types
pub use builder::FraudEngineBuilder;
pub use config::EngineConfig;
pub use engine::FraudEngine;
pub use error::{Result, SdkError};
pub use types::{AnalysisResponse, TransactionRequest};

// Re-export commonly used types from dependencies
pub use riskgate_core::{RiskAction, RiskDecision, RiskLevel, Value};
