//! Error types for the bmi_core library.

use crate::Variable;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text or number that cannot be accepted as a measurement
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Attempted to edit the field currently solved for
    #[error("{0} is derived from the other fields and cannot be edited")]
    DerivedField(Variable),

    /// Health endpoint server error
    #[error("Server error: {0}")]
    Server(String),
}
