//! User-related models

use serde::{Deserialize, Serialize};

use super::wire::{deserialize_id_string, deserialize_u64_lenient};
use crate::types::{UserId, Xp};

/// Response from `GET /api/me`
///
/// The current backend returns `{ id, name, xp, is_admin }`; older revisions
/// used `username`/`full_name`/`xp_balance`. All of them parse into this one
/// wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(deserialize_with = "deserialize_id_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, alias = "xp_balance", deserialize_with = "deserialize_u64_lenient")]
    pub xp: u64,
    #[serde(default)]
    pub is_admin: bool,
    /// Dev-mode bearer token the backend attaches for admin users
    #[serde(default)]
    pub admin_token: Option<String>,
}

impl MeResponse {
    /// Convert to the canonical snapshot used everywhere past this point
    pub fn into_snapshot(self) -> UserSnapshot {
        let display_name = self
            .full_name
            .or_else(|| self.name.clone())
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| "Guest".to_string());
        let user_id = UserId::new(self.id);

        UserSnapshot {
            account: UserAccount {
                id: user_id.clone(),
                display_name,
                username: self.username.or(self.name),
                is_admin: self.is_admin,
                admin_token: self.admin_token,
            },
            balance: UserBalance {
                user_id,
                xp: Xp::new(self.xp),
            },
        }
    }
}

/// Who the caller is, as far as rendering is concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub admin_token: Option<String>,
}

/// Cached copy of the caller's XP balance
///
/// The server is authoritative; this value is owned by the presentation
/// layer and replaced (never patched in place) after every successful
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalance {
    pub user_id: UserId,
    pub xp: Xp,
}

impl UserBalance {
    pub fn new(user_id: UserId, xp: Xp) -> Self {
        Self { user_id, xp }
    }

    /// The balance after a server- or locally-confirmed spend
    pub fn with_xp(&self, xp: Xp) -> Self {
        Self {
            user_id: self.user_id.clone(),
            xp,
        }
    }
}

/// Account plus balance, the unit `GET /api/me` resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub account: UserAccount,
    pub balance: UserBalance,
}

impl UserSnapshot {
    /// Demo user shown when neither the backend nor the host environment
    /// can identify the caller. 1000 XP so every fallback box is openable.
    pub fn demo() -> Self {
        Self {
            account: UserAccount {
                id: UserId::new("0"),
                display_name: "Demo User".to_string(),
                username: Some("demo_user".to_string()),
                is_admin: false,
                admin_token: None,
            },
            balance: UserBalance {
                user_id: UserId::new("0"),
                xp: Xp::new(1000),
            },
        }
    }

    /// Offline user built from the host environment's unsigned profile hint.
    ///
    /// The hint is not authoritative, so the balance starts at zero rather
    /// than inventing XP the server never granted.
    pub fn from_hint(hint: &ProfileHint) -> Self {
        let user_id = UserId::from(hint.id);
        Self {
            account: UserAccount {
                id: user_id.clone(),
                display_name: hint.display_name(),
                username: hint.username.clone(),
                is_admin: false,
                admin_token: None,
            },
            balance: UserBalance {
                user_id,
                xp: Xp::new(0),
            },
        }
    }
}

/// Unsigned user payload the host environment exposes alongside the signed
/// credential. A rendering hint only; never trusted for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileHint {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl ProfileHint {
    /// Display name the way the widget greets the user: first + last name,
    /// falling back to the username, then a generic label.
    pub fn display_name(&self) -> String {
        let full = match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        };
        let full = full.trim().to_string();
        if !full.is_empty() {
            return full;
        }
        self.username
            .clone()
            .unwrap_or_else(|| "Telegram User".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_me_response_current_shape() {
        let json = r#"{ "id": 42, "name": "Alice", "xp": 750, "is_admin": true }"#;
        let me: MeResponse = serde_json::from_str(json).unwrap();
        let snapshot = me.into_snapshot();

        assert_eq!(snapshot.account.id, UserId::new("42"));
        assert_eq!(snapshot.account.display_name, "Alice");
        assert!(snapshot.account.is_admin);
        assert_eq!(snapshot.balance.xp, Xp::new(750));
    }

    #[test]
    fn test_me_response_legacy_shape() {
        let json = r#"{ "id": "u-9", "username": "bob", "full_name": "Bob B", "xp_balance": "120" }"#;
        let me: MeResponse = serde_json::from_str(json).unwrap();
        let snapshot = me.into_snapshot();

        assert_eq!(snapshot.account.display_name, "Bob B");
        assert_eq!(snapshot.balance.xp, Xp::new(120));
        assert!(!snapshot.account.is_admin);
    }

    #[test]
    fn test_hint_display_name_falls_back_to_username() {
        let hint = ProfileHint {
            id: 7,
            first_name: "".to_string(),
            last_name: None,
            username: Some("ghost".to_string()),
        };
        assert_eq!(hint.display_name(), "ghost");
    }

    #[test]
    fn test_snapshot_from_hint_has_zero_balance() {
        let hint = ProfileHint {
            id: 7,
            first_name: "Eva".to_string(),
            last_name: Some("K".to_string()),
            username: None,
        };
        let snapshot = UserSnapshot::from_hint(&hint);
        assert_eq!(snapshot.account.display_name, "Eva K");
        assert_eq!(snapshot.balance.xp, Xp::new(0));
    }
}
