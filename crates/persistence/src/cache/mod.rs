//! In-memory session cache for the resolved caller identity
//!
//! The host environment is not guaranteed to re-populate its identity data
//! after a client-side navigation, so the last successful resolution is kept
//! here and consulted when the live environment yields nothing.

use chrono::{DateTime, Utc};
use miniloot_core::CallerIdentity;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// A cached identity with the time it was resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedIdentity {
    pub identity: CallerIdentity,
    pub resolved_at: DateTime<Utc>,
}

/// Thread-safe, single-snapshot cache of the session's identity
///
/// One snapshot per process; storing replaces the previous value. Anonymous
/// identities are never stored, so a later cache hit always carries real
/// identity data.
pub struct SessionCache {
    identity: RwLock<Option<CachedIdentity>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            identity: RwLock::new(None),
        }
    }

    /// Store the identity from a successful live resolution.
    /// Anonymous identities are ignored.
    pub fn store(&self, identity: &CallerIdentity) {
        if identity.is_anonymous() {
            return;
        }
        if let Ok(mut slot) = self.identity.write() {
            *slot = Some(CachedIdentity {
                identity: identity.clone(),
                resolved_at: Utc::now(),
            });
        }
    }

    /// Get the cached identity, if any
    pub fn load(&self) -> Option<CallerIdentity> {
        let slot = self.identity.read().ok()?;
        slot.as_ref().map(|cached| cached.identity.clone())
    }

    /// When the cached identity was resolved, if one is cached
    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        let slot = self.identity.read().ok()?;
        slot.as_ref().map(|cached| cached.resolved_at)
    }

    /// Drop the cached identity
    pub fn clear(&self) {
        if let Ok(mut slot) = self.identity.write() {
            *slot = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.identity
            .read()
            .map(|slot| slot.is_none())
            .unwrap_or(true)
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniloot_core::{CallerIdentity, IdentitySource};

    #[test]
    fn test_store_and_load_roundtrip() {
        let cache = SessionCache::new();
        assert!(cache.is_empty());

        let identity = CallerIdentity::from_override("signed-payload");
        cache.store(&identity);

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.raw_credential.as_deref(), Some("signed-payload"));
        assert!(cache.resolved_at().is_some());
    }

    #[test]
    fn test_anonymous_identity_not_stored() {
        let cache = SessionCache::new();
        cache.store(&CallerIdentity::anonymous());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_replaces_previous_snapshot() {
        let cache = SessionCache::new();
        cache.store(&CallerIdentity::from_override("first"));
        cache.store(&CallerIdentity::from_override("second"));

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.raw_credential.as_deref(), Some("second"));
        assert_eq!(loaded.source, IdentitySource::Override);
    }

    #[test]
    fn test_clear() {
        let cache = SessionCache::new();
        cache.store(&CallerIdentity::from_override("payload"));
        cache.clear();
        assert!(cache.load().is_none());
    }
}
