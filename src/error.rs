//! Error types
//!
//! Gameplay itself is total: a declined purchase or a lost run are ordinary
//! outcomes. Errors are reserved for bad configuration and contract
//! violations at the crate boundary.

use thiserror::Error;

/// Errors surfaced by configuration loading and the shop API
#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration value is outside its valid range
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// Configuration JSON could not be decoded
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Loadout id not present in the catalog
    #[error("unknown loadout id {0}")]
    UnknownLoadout(usize),
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;
