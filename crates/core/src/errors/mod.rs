//! Error types and Result alias for the mini app client

use thiserror::Error;

use crate::types::Xp;

/// Main error type for the mini app client
#[derive(Error, Debug)]
pub enum Error {
    #[error("Insufficient XP: {0}")]
    InsufficientFunds(String),

    #[error("Lootbox has an empty prize pool")]
    EmptyPrizePool,

    #[error("Lootbox catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Insufficient-funds error from a failed client-side affordability check
    pub fn insufficient_funds(required: Xp, available: Xp) -> Self {
        Error::InsufficientFunds(format!(
            "required {} XP, available {} XP",
            required.as_u64(),
            available.as_u64()
        ))
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::TransportFailure(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
