//! Miniloot Engine - Lootbox catalog and the open-transaction

pub mod catalog;
pub mod transaction;

pub use catalog::{fallback_catalog, list_lootboxes};
pub use transaction::TransactionEngine;
