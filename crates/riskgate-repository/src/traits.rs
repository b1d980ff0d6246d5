//! Core trait definitions for the repository pattern
//!
//! These are the engine's ports: the scoring algorithm is a pure
//! function over explicit inputs, and every read or side effect flows
//! through one of these traits so storage stays swappable (and fakeable
//! in tests).
//!
//! # Thread Safety
//!
//! All implementations must be `Send + Sync` for use across async
//! tasks. Concurrent evaluations for the same identity can race on the
//! profile read-modify-write and on rule trigger counters, so
//! implementations must apply `update_profile` and `increment_trigger`
//! atomically. `save_profile` is a whole-record replace for seeding
//! and administrative writes, not for the evaluation path.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use riskgate_core::{Alert, DeviceFingerprint, FraudRule, ListEntryType, ListKind, RiskProfile};

use crate::RepositoryResult;

/// Read access to the operator-authored rule set
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// All active rules, ordered by priority descending
    async fn active_rules(&self) -> RepositoryResult<Vec<FraudRule>>;

    /// Atomically increment a rule's trigger counter
    async fn increment_trigger(&self, rule_id: &str) -> RepositoryResult<()>;
}

/// Read access to blacklist/whitelist entries
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// True when an active, unexpired entry of the given kind and type
    /// matches `value` at `now`
    async fn has_active_entry(
        &self,
        kind: ListKind,
        entry_type: ListEntryType,
        value: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<bool>;

    /// Insert a new entry
    async fn add_entry(&self, entry: riskgate_core::ListEntry) -> RepositoryResult<()>;

    /// Deactivate every entry of the given kind and type matching
    /// `value`; returns how many entries were deactivated
    async fn deactivate_entries(
        &self,
        kind: ListKind,
        entry_type: ListEntryType,
        value: &str,
    ) -> RepositoryResult<u64>;
}

/// Mutation applied to a profile under the store's atomicity guarantee
pub type ProfileUpdate = Box<dyn FnOnce(&mut RiskProfile) + Send>;

/// Per-identity risk state store
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile for an identity, creating a fresh one on
    /// first sight
    async fn get_or_create(&self, email: &str, now: DateTime<Utc>) -> RepositoryResult<RiskProfile>;

    /// Atomically apply a mutation to an identity's profile, creating
    /// a fresh one on first sight; returns the updated profile.
    /// Concurrent updates for the same identity must serialize, never
    /// overwrite each other's writes.
    async fn update_profile(
        &self,
        email: &str,
        now: DateTime<Utc>,
        apply: ProfileUpdate,
    ) -> RepositoryResult<RiskProfile>;

    /// Replace the stored profile wholesale (seeding, admin edits)
    async fn save_profile(&self, profile: &RiskProfile) -> RepositoryResult<()>;
}

/// Count queries over stored transaction history, used by the velocity
/// analyzer
///
/// Windows are computed on demand from history, not maintained as
/// running counters.
#[async_trait]
pub trait TransactionHistory: Send + Sync {
    /// Transactions by `email` within the trailing `window` ending at `now`
    async fn count_recent(
        &self,
        email: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RepositoryResult<u64>;

    /// Transactions by `email` with amount above `min_amount` within the
    /// trailing `window` ending at `now`
    async fn count_recent_above(
        &self,
        email: &str,
        min_amount: f64,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RepositoryResult<u64>;
}

/// Sink for high-risk alerts
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Record an alert for downstream review
    async fn create_alert(&self, alert: Alert) -> RepositoryResult<()>;
}

/// Observational store for device fingerprints
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Record an observation: insert on first sight, otherwise update
    /// last-seen and the associated identity
    async fn observe(
        &self,
        fingerprint_hash: &str,
        email: &str,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<DeviceFingerprint>;
}
