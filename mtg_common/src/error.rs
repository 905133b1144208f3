//! Error types for Scryfall lookups

use thiserror::Error;

/// Unified error type for Scryfall operations
#[derive(Debug, Error)]
pub enum ScryfallError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Scryfall answered, but could not resolve the name
    #[error("Card not found on Scryfall: {name} ({details})")]
    NotFound { name: String, details: String },
    /// HTTP error status code without a Scryfall error body
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
}

impl ScryfallError {
    /// True when the lookup reached Scryfall and the card simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScryfallError::NotFound { .. })
    }
}

/// Result alias for Scryfall operations
pub type ScryfallResult<T> = Result<T, ScryfallError>;
