//! Admin boundary models
//!
//! The admin page itself is rendered elsewhere; these are the shapes the
//! client exchanges with the admin endpoints on its behalf.

use serde::{Deserialize, Serialize};

use super::wire::{deserialize_id_string, deserialize_u64_lenient};
use crate::types::{UserId, Xp};

/// User row from `GET /api/admin/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserWire {
    #[serde(deserialize_with = "deserialize_id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_u64_lenient")]
    pub xp: u64,
}

impl AdminUserWire {
    pub fn into_admin_user(self) -> AdminUser {
        AdminUser {
            id: UserId::new(self.id),
            name: self.name,
            xp: Xp::new(self.xp),
        }
    }
}

/// Canonical admin user listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: UserId,
    pub name: String,
    pub xp: Xp,
}

/// Body for `POST /api/admin/users/{id}/accrue-xp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrueXpRequest {
    pub amount: u64,
    pub reason: String,
}

/// Response from an accrual: the user's new XP total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrueXpResponse {
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub xp: u64,
}

/// Response from the dev-mode admin token helper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevTokenResponse {
    pub token: String,
}
