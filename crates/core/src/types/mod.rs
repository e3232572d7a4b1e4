//! Shared type definitions and newtypes

use serde::{Deserialize, Serialize};
use std::fmt;

/// XP amount (for clarity in function signatures)
///
/// Non-negative by construction; the authoritative value lives server-side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Xp(pub u64);

impl Xp {
    pub fn new(amount: u64) -> Self {
        Xp(amount)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Subtract a cost, returning `None` on underflow.
    ///
    /// Callers are expected to have passed an affordability check first;
    /// `None` here means that check was skipped or raced a stale balance.
    pub fn checked_sub(&self, cost: Xp) -> Option<Xp> {
        self.0.checked_sub(cost.0).map(Xp)
    }
}

impl fmt::Display for Xp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable user identifier, opaque to the client
///
/// The backend may issue numeric or string ids; both normalize to this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_sub_exact() {
        let balance = Xp::new(1000);
        assert_eq!(balance.checked_sub(Xp::new(1000)), Some(Xp::new(0)));
    }

    #[test]
    fn test_checked_sub_underflow() {
        let balance = Xp::new(100);
        assert_eq!(balance.checked_sub(Xp::new(200)), None);
    }
}
