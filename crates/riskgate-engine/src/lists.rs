//! List gate
//!
//! Checks an identity against active blacklist/whitelist entries. A
//! match on any of email, email domain, IP, or (when provided) country
//! is sufficient. A failing list repository is treated as an empty
//! list, so a storage outage degrades rather than aborts.

use chrono::{DateTime, Utc};
use riskgate_core::{ListEntryType, ListKind};
use riskgate_repository::ListRepository;

/// Identity signals checked against the lists
#[derive(Debug, Clone, Copy)]
pub struct IdentitySignals<'a> {
    pub email: &'a str,
    pub ip_address: &'a str,
    pub country_code: Option<&'a str>,
}

/// Gate over the list repository
pub struct ListGate;

impl ListGate {
    /// True when any identity signal matches an active blacklist entry
    pub async fn is_blacklisted(
        lists: &dyn ListRepository,
        identity: IdentitySignals<'_>,
        now: DateTime<Utc>,
    ) -> bool {
        Self::matches(lists, ListKind::Blacklist, identity, now).await
    }

    /// True when any identity signal matches an active whitelist entry
    pub async fn is_whitelisted(
        lists: &dyn ListRepository,
        identity: IdentitySignals<'_>,
        now: DateTime<Utc>,
    ) -> bool {
        Self::matches(lists, ListKind::Whitelist, identity, now).await
    }

    async fn matches(
        lists: &dyn ListRepository,
        kind: ListKind,
        identity: IdentitySignals<'_>,
        now: DateTime<Utc>,
    ) -> bool {
        let mut probes: Vec<(ListEntryType, &str)> = vec![
            (ListEntryType::Email, identity.email),
            (ListEntryType::Ip, identity.ip_address),
        ];
        if let Some(domain) = identity.email.rsplit_once('@').map(|(_, d)| d) {
            probes.push((ListEntryType::Domain, domain));
        }
        if let Some(country) = identity.country_code {
            probes.push((ListEntryType::Country, country));
        }

        for (entry_type, value) in probes {
            match lists.has_active_entry(kind, entry_type, value, now).await {
                Ok(true) => {
                    tracing::debug!(?kind, ?entry_type, value, "list entry matched");
                    return true;
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(?kind, ?entry_type, error = %e, "list lookup failed, treating as no match");
                }
            }
        }

        false
    }
}
