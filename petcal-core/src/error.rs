//! Error types for petcal.

use thiserror::Error;

/// Errors that can occur in petcal operations.
///
/// Store mutations never return these; they only surface from constructors,
/// storage adapters and config loading.
#[derive(Error, Debug)]
pub enum PetcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid quiet hours: {0}")]
    InvalidQuietHours(String),

    #[error(
        "Unknown reminder preset '{0}' (available: atTime, 5min, 15min, 30min, 1hour, 2hours, 1day, 1week)"
    )]
    UnknownPreset(String),
}

impl From<serde_json::Error> for PetcalError {
    fn from(e: serde_json::Error) -> Self {
        PetcalError::Serialization(e.to_string())
    }
}

/// Result type alias for petcal operations.
pub type PetcalResult<T> = Result<T, PetcalError>;
