//! HTTP transport for the loyalty backend

mod client;

pub use client::{MiniAppClient, DEFAULT_API_BASE};
