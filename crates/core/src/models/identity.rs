//! Caller identity resolved from the hosting environment

use serde::{Deserialize, Serialize};

use super::user::ProfileHint;

/// Where a resolved identity came from, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentitySource {
    /// Explicit override credential supplied by the embedder
    Override,
    /// Signed init payload read live from the host environment
    SignedPayload,
    /// Only the unsigned profile hint was available
    ProfileHint,
    /// Restored from the session cache after a navigation
    SessionCache,
    /// Nothing identified the caller; a valid unauthenticated state
    Anonymous,
}

/// The resolved representation of who is making requests
///
/// `raw_credential` is the host's signed init payload, forwarded to the
/// backend verbatim and never parsed or trusted client-side. The profile
/// hint rides along for offline rendering; when both are present the signed
/// payload decides the `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub raw_credential: Option<String>,
    pub profile_hint: Option<ProfileHint>,
    pub source: IdentitySource,
}

impl CallerIdentity {
    /// The unauthenticated identity; requests carry no credential headers.
    pub fn anonymous() -> Self {
        Self {
            raw_credential: None,
            profile_hint: None,
            source: IdentitySource::Anonymous,
        }
    }

    /// Identity from an explicit override credential. Always wins over
    /// anything the live environment provides.
    pub fn from_override(credential: impl Into<String>) -> Self {
        Self {
            raw_credential: Some(credential.into()),
            profile_hint: None,
            source: IdentitySource::Override,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.raw_credential.is_none() && self.profile_hint.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity_is_empty() {
        let identity = CallerIdentity::anonymous();
        assert!(identity.is_anonymous());
        assert_eq!(identity.source, IdentitySource::Anonymous);
    }

    #[test]
    fn test_override_identity_carries_credential() {
        let identity = CallerIdentity::from_override("query_id=abc");
        assert!(!identity.is_anonymous());
        assert_eq!(identity.raw_credential.as_deref(), Some("query_id=abc"));
        assert_eq!(identity.source, IdentitySource::Override);
    }
}
