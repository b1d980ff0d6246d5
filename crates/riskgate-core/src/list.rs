//! Blacklist and whitelist entries
//!
//! Blacklist entries hard-override every other signal; whitelist
//! entries only soften the score. An entry is active only while
//! `is_active` holds and its expiry, if any, lies in the future.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Blacklist,
    Whitelist,
}

/// What kind of identity signal an entry matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListEntryType {
    Email,
    Ip,
    Domain,
    Country,
    CardBin,
}

/// One list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Blacklist or whitelist
    pub kind: ListKind,

    /// Signal type this entry matches
    pub entry_type: ListEntryType,

    /// The matched value (email address, IP, ISO country code, ...)
    pub value: String,

    /// Operator-supplied reason for the entry
    pub reason: String,

    /// Optional expiry; entries past this time no longer match
    pub expires_at: Option<DateTime<Utc>>,

    /// Deactivated entries never match
    pub is_active: bool,

    /// When the entry was created
    pub created_at: DateTime<Utc>,
}

impl ListEntry {
    /// Create an active, non-expiring entry
    pub fn new(
        kind: ListKind,
        entry_type: ListEntryType,
        value: impl Into<String>,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            entry_type,
            value: value.into(),
            reason: reason.into(),
            expires_at: None,
            is_active: true,
            created_at: now,
        }
    }

    /// Set an expiry time
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// True when the entry should be matched at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |exp| exp > now)
    }
}
