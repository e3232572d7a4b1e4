//! Data models for mini app entities

mod admin;
mod identity;
mod lootbox;
mod user;
mod wire;

pub use admin::*;
pub use identity::*;
pub use lootbox::*;
pub use user::*;
