//! Admin API operations with validation
//!
//! The admin page rendering lives elsewhere; these wrappers are the client
//! side of its interface boundary. Each accepts an optional explicit bearer
//! token; without one the caller's identity headers authorize the request.

use crate::MiniAppClient;
use miniloot_core::{AccrueXpRequest, AdminUser, Error, Result, UserId, Xp};
use tracing::info;

/// List all users with their XP totals
pub async fn list_users(client: &MiniAppClient, bearer: Option<&str>) -> Result<Vec<AdminUser>> {
    client.get_admin_users(bearer).await
}

/// Manually grant XP to a user
///
/// # Arguments
/// * `amount` - XP to grant, must be positive
/// * `reason` - audit label stored by the backend (e.g. "admin_manual")
///
/// # Returns
/// The user's new XP total as reported by the backend
pub async fn accrue_xp(
    client: &MiniAppClient,
    user_id: &UserId,
    amount: u64,
    reason: &str,
    bearer: Option<&str>,
) -> Result<Xp> {
    if amount == 0 {
        return Err(Error::InvalidData(
            "Accrual amount must be positive".to_string(),
        ));
    }

    info!("Granting {} XP to user {} ({})", amount, user_id, reason);

    let request = AccrueXpRequest {
        amount,
        reason: reason.to_string(),
    };
    client.accrue_xp(user_id, request, bearer).await
}

/// Fetch a dev-mode admin bearer token for a Telegram id
pub async fn fetch_dev_admin_token(client: &MiniAppClient, telegram_id: i64) -> Result<String> {
    client.get_dev_admin_token(telegram_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniloot_core::CallerIdentity;

    #[tokio::test]
    async fn test_accrue_zero_amount_rejected_before_any_request() {
        // base URL is never contacted: validation fails first
        let client = MiniAppClient::new("http://127.0.0.1:1", CallerIdentity::anonymous());
        let err = accrue_xp(&client, &UserId::new("1"), 0, "admin_manual", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
