//! Caller identity resolution and outbound auth headers
//!
//! The hosting environment (a Telegram WebView, or a plain browser with
//! nothing to offer) populates its identity data asynchronously, sometimes
//! hundreds of milliseconds after the widget starts. The resolver waits a
//! bounded amount of time for that data, falls back to the session cache
//! when the environment lost its state across a navigation, and otherwise
//! settles on an anonymous identity. Anonymous is a valid state, not an
//! error.

use base64::Engine;
use miniloot_core::{CallerIdentity, Error, IdentitySource, ProfileHint, Result};
use miniloot_persistence::SessionCache;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Header carrying the signed init payload, forwarded verbatim
pub const HEADER_INIT_DATA: &str = "x-telegram-initdata";
/// Header carrying the base64-encoded unsigned profile hint
pub const HEADER_PROFILE: &str = "x-telegram-user";
/// Companion flag telling the backend the profile header was encoded
pub const HEADER_PROFILE_ENCODED: &str = "x-telegram-user-b64";

/// How often the resolver re-checks the host while waiting
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The seam to the hosting environment.
///
/// Both accessors return `None` until the host has populated its data;
/// implementations must be cheap to poll.
pub trait HostEnvironment: Send + Sync {
    /// Signed init payload issued by the host, if populated
    fn init_data(&self) -> Option<String>;

    /// Unsigned profile payload, if populated
    fn profile_hint(&self) -> Option<ProfileHint>;

    /// Tell the host the widget is ready to receive identity data.
    /// Called at most once per resolver.
    fn signal_ready(&self) {}
}

/// A host environment with nothing to offer (plain-browser mode)
pub struct NoHost;

impl HostEnvironment for NoHost {
    fn init_data(&self) -> Option<String> {
        None
    }

    fn profile_hint(&self) -> Option<ProfileHint> {
        None
    }
}

/// Resolves the caller identity once per session
///
/// Precedence: explicit override credential, then the host's signed payload,
/// then the unsigned profile hint, then the session cache. Resolution is
/// idempotent; the host readiness signal fires at most once.
pub struct IdentityResolver {
    env: Arc<dyn HostEnvironment>,
    cache: Arc<SessionCache>,
    override_credential: Option<String>,
    ready_sent: AtomicBool,
}

impl IdentityResolver {
    pub fn new(env: Arc<dyn HostEnvironment>, cache: Arc<SessionCache>) -> Self {
        Self {
            env,
            cache,
            override_credential: None,
            ready_sent: AtomicBool::new(false),
        }
    }

    /// Use an explicit credential instead of whatever the host provides.
    /// Always wins; the host is not even polled.
    pub fn with_override(mut self, credential: impl Into<String>) -> Self {
        self.override_credential = Some(credential.into());
        self
    }

    /// Resolve the caller identity, waiting up to `timeout` for the host to
    /// populate its data.
    ///
    /// Returns as soon as identity data appears. When the timeout elapses
    /// the session cache is consulted; with nothing cached either, the
    /// anonymous identity is returned.
    pub async fn resolve(&self, timeout: Duration) -> CallerIdentity {
        if !self.ready_sent.swap(true, Ordering::SeqCst) {
            self.env.signal_ready();
        }

        if let Some(credential) = &self.override_credential {
            debug!("Override credential present, skipping host wait");
            return CallerIdentity::from_override(credential.clone());
        }

        match tokio::time::timeout(timeout, self.wait_for_host()).await {
            Ok(identity) => {
                debug!(source = ?identity.source, "Identity resolved from host");
                self.cache.store(&identity);
                identity
            }
            Err(_) => match self.cache.load() {
                Some(cached) => {
                    debug!("Host yielded nothing; restoring identity from session cache");
                    CallerIdentity {
                        source: IdentitySource::SessionCache,
                        ..cached
                    }
                }
                None => {
                    debug!(?timeout, "Host yielded nothing; continuing anonymously");
                    CallerIdentity::anonymous()
                }
            },
        }
    }

    async fn wait_for_host(&self) -> CallerIdentity {
        loop {
            let init_data = self.env.init_data();
            let profile_hint = self.env.profile_hint();

            if init_data.is_some() || profile_hint.is_some() {
                let source = if init_data.is_some() {
                    IdentitySource::SignedPayload
                } else {
                    IdentitySource::ProfileHint
                };
                return CallerIdentity {
                    raw_credential: init_data,
                    profile_hint,
                    source,
                };
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Derive the outbound auth headers from a resolved identity.
///
/// Deterministic: the same identity always produces the same headers. The
/// signed payload travels verbatim; the profile hint is JSON-serialized and
/// base64-encoded so display names in arbitrary scripts survive the
/// ASCII-only header transport, with a companion flag header so the
/// receiving side knows to reverse the encoding.
pub fn build_auth_headers(identity: &CallerIdentity) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );

    if let Some(credential) = &identity.raw_credential {
        let value = HeaderValue::from_str(credential).map_err(|e| {
            Error::InvalidData(format!("init payload is not header-safe: {}", e))
        })?;
        headers.insert(HeaderName::from_static(HEADER_INIT_DATA), value);
    }

    if let Some(hint) = &identity.profile_hint {
        let json = serde_json::to_string(hint)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(json.as_bytes());
        let value = HeaderValue::from_str(&encoded)
            .map_err(|e| Error::InvalidData(format!("profile hint is not header-safe: {}", e)))?;
        headers.insert(HeaderName::from_static(HEADER_PROFILE), value);
        headers.insert(
            HeaderName::from_static(HEADER_PROFILE_ENCODED),
            HeaderValue::from_static("1"),
        );
    }

    Ok(headers)
}
