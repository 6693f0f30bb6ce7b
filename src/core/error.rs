use thiserror::Error;

use crate::core::types::Timestamp;

#[derive(Error, Debug)]
pub enum SimError {
    /// `advance` was asked to reconcile to a time before the last reconciliation.
    /// This is a caller bug, never a simulation outcome.
    #[error("Target time {target} precedes last reconciled timestamp {last}")]
    TimeReversal { target: Timestamp, last: Timestamp },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid behavior graph: {0}")]
    InvalidGraph(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
