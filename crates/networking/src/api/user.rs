//! User-related API operations

use crate::MiniAppClient;
use miniloot_core::{Result, UserSnapshot};
use tracing::warn;

/// Fetch the caller's account and balance
pub async fn fetch_user(client: &MiniAppClient) -> Result<UserSnapshot> {
    client.get_me().await
}

/// Fetch the caller's account and balance, degrading to offline data.
///
/// When the backend is unreachable or rejects the request, the widget still
/// needs someone to greet: a user built from the host's profile hint when
/// one was resolved (0 XP, since the hint is not authoritative), otherwise
/// the demo user.
pub async fn fetch_user_or_fallback(client: &MiniAppClient) -> UserSnapshot {
    match client.get_me().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("User fetch failed, entering offline mode: {}", e);
            match &client.identity().profile_hint {
                Some(hint) => UserSnapshot::from_hint(hint),
                None => UserSnapshot::demo(),
            }
        }
    }
}
