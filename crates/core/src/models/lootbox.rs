//! Lootbox catalog and open-transaction models

use serde::{Deserialize, Serialize};

use super::wire::{deserialize_id_string, deserialize_u64_lenient};
use crate::types::Xp;

/// Catalog entry from `GET /api/lootboxes`
///
/// Field names drifted across backend revisions (`cost_xp`/`cost`,
/// `prize_preview`/`prizes`, `name`/`title`); the aliases absorb all of
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootboxWire {
    #[serde(deserialize_with = "deserialize_id_string")]
    pub id: String,
    #[serde(default = "default_box_name", alias = "title")]
    pub name: String,
    #[serde(default, alias = "cost", deserialize_with = "deserialize_u64_lenient")]
    pub cost_xp: u64,
    #[serde(default, alias = "prizes")]
    pub prize_preview: Vec<String>,
}

fn default_box_name() -> String {
    "Unnamed Box".to_string()
}

impl LootboxWire {
    /// Convert to the canonical catalog entry
    pub fn into_lootbox(self) -> Lootbox {
        Lootbox {
            id: self.id,
            name: self.name,
            cost_xp: Xp::new(self.cost_xp),
            prize_pool: self.prize_preview,
        }
    }
}

/// A purchasable catalog entry (canonical, read-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lootbox {
    pub id: String,
    pub name: String,
    pub cost_xp: Xp,
    pub prize_pool: Vec<String>,
}

impl Lootbox {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost_xp: u64,
        prize_pool: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost_xp: Xp::new(cost_xp),
            prize_pool,
        }
    }
}

/// Response from `POST /api/lootboxes/{id}/open`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenResultWire {
    pub prize: String,
    #[serde(alias = "remainingXp", deserialize_with = "deserialize_u64_lenient")]
    pub remaining_xp: u64,
}

impl OpenResultWire {
    pub fn into_outcome(self) -> OpenOutcome {
        OpenOutcome {
            prize: self.prize,
            remaining_xp: Xp::new(self.remaining_xp),
        }
    }
}

/// Outcome of one open-transaction
///
/// `remaining_xp` is the caller's balance after the spend; authoritative
/// whenever the server produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOutcome {
    pub prize: String,
    pub remaining_xp: Xp,
}

/// Error body the backend sends with a well-formed 400 rejection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lootbox_wire_current_shape() {
        let json = r#"{ "id": "lb-200", "name": "Bronze Box", "cost_xp": 200, "prize_preview": ["Sticker"] }"#;
        let wire: LootboxWire = serde_json::from_str(json).unwrap();
        let lootbox = wire.into_lootbox();

        assert_eq!(lootbox.id, "lb-200");
        assert_eq!(lootbox.cost_xp, Xp::new(200));
        assert_eq!(lootbox.prize_pool, vec!["Sticker".to_string()]);
    }

    #[test]
    fn test_lootbox_wire_legacy_aliases() {
        let json = r#"{ "id": 3, "title": "Gold Box", "cost": "1000", "prizes": ["Battery", "E-liquid 50ml"] }"#;
        let wire: LootboxWire = serde_json::from_str(json).unwrap();
        let lootbox = wire.into_lootbox();

        assert_eq!(lootbox.id, "3");
        assert_eq!(lootbox.name, "Gold Box");
        assert_eq!(lootbox.cost_xp, Xp::new(1000));
        assert_eq!(lootbox.prize_pool.len(), 2);
    }

    #[test]
    fn test_lootbox_wire_missing_name_and_prizes() {
        let json = r#"{ "id": "x" }"#;
        let wire: LootboxWire = serde_json::from_str(json).unwrap();
        let lootbox = wire.into_lootbox();

        assert_eq!(lootbox.name, "Unnamed Box");
        assert!(lootbox.prize_pool.is_empty());
        assert_eq!(lootbox.cost_xp, Xp::new(0));
    }

    #[test]
    fn test_open_result_camel_case_alias() {
        let json = r#"{ "prize": "Sticker", "remainingXp": 300 }"#;
        let wire: OpenResultWire = serde_json::from_str(json).unwrap();
        let outcome = wire.into_outcome();

        assert_eq!(outcome.prize, "Sticker");
        assert_eq!(outcome.remaining_xp, Xp::new(300));
    }
}
