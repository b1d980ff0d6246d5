//! Riskgate Repository - storage ports for the fraud decision engine
//!
//! The scoring pipeline never talks to a database directly; every side
//! effect goes through the traits defined here. The in-memory backends
//! serve tests and single-process deployments.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::{
    MemoryAlertSink, MemoryDeviceRepository, MemoryListRepository, MemoryProfileRepository,
    MemoryRuleRepository, MemoryTransactionHistory,
};
pub use traits::{
    AlertSink, DeviceRepository, ListRepository, ProfileRepository, ProfileUpdate, RuleRepository,
    TransactionHistory,
};
