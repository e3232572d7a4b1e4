//! Miniloot Networking - Identity resolution, HTTP client, and API wrappers

pub mod api;
pub mod http;
pub mod identity;

pub use http::MiniAppClient;
pub use identity::{HostEnvironment, IdentityResolver};
