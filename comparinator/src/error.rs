//! Error types for comparinator

use thiserror::Error;

use crate::engine::EngineError;

/// Unified error type for comparinator operations
#[derive(Debug, Error)]
pub enum Error {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to read or write CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Failed to (de)serialize session JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Scryfall client could not be constructed
    #[error("Scryfall error: {0}")]
    Scryfall(#[from] mtg_common::ScryfallError),
    /// Comparison engine rejected the operation
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Export requested while cards are still being considered
    #[error("Comparison not finished: {0} cards still to consider")]
    NotFinished(usize),
    /// Session file is missing or unusable
    #[error("Session error: {0}")]
    Session(String),
    /// Input file is readable but not in the expected shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias for comparinator operations
pub type Result<T> = std::result::Result<T, Error>;
