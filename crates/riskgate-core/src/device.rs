//! Device fingerprint records
//!
//! Purely observational: fingerprints never gate a decision directly,
//! they are stored for later correlation across identities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed device fingerprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceFingerprint {
    /// Hash of the client-supplied attribute bundle
    pub fingerprint_hash: String,

    /// Email the device was last seen with
    pub email: String,

    /// IP the device was last seen from
    pub ip_address: String,

    /// First time this fingerprint was observed
    pub first_seen_at: DateTime<Utc>,

    /// Most recent observation
    pub last_seen_at: DateTime<Utc>,

    /// How many times this fingerprint has been observed
    pub seen_count: u64,
}

impl DeviceFingerprint {
    /// Record a first observation
    pub fn first_seen(
        fingerprint_hash: impl Into<String>,
        email: impl Into<String>,
        ip_address: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            fingerprint_hash: fingerprint_hash.into(),
            email: email.into(),
            ip_address: ip_address.into(),
            first_seen_at: now,
            last_seen_at: now,
            seen_count: 1,
        }
    }

    /// Fold in a repeat observation
    pub fn touch(&mut self, email: impl Into<String>, ip_address: impl Into<String>, now: DateTime<Utc>) {
        self.email = email.into();
        self.ip_address = ip_address.into();
        self.last_seen_at = now;
        self.seen_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fingerprint_touch() {
        let now = Utc::now();
        let mut fp = DeviceFingerprint::first_seen("abc123", "a@test.com", "1.2.3.4", now);
        assert_eq!(fp.seen_count, 1);

        let later = now + Duration::hours(1);
        fp.touch("b@test.com", "5.6.7.8", later);
        assert_eq!(fp.seen_count, 2);
        assert_eq!(fp.first_seen_at, now);
        assert_eq!(fp.last_seen_at, later);
        assert_eq!(fp.email, "b@test.com");
    }
}
