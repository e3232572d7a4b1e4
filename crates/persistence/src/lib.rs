//! Miniloot Persistence - Session-scoped caching layer

pub mod cache;

pub use cache::SessionCache;
