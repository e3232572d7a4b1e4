//! High-level API wrappers for the loyalty backend
//!
//! This module provides convenient wrappers around the raw HTTP client,
//! adding validation and the documented offline fallbacks.

mod admin;
mod user;

pub use admin::*;
pub use user::*;
