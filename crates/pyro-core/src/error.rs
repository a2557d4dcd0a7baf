//! Error types for Pyro

use thiserror::Error;

/// The main error type for Pyro operations.
///
/// Simulation never fails once an instance has been constructed; every
/// variant here is raised at construction or configuration time.
#[derive(Debug, Error)]
pub enum PyroError {
    #[error("Invalid duration: must be finite and non-negative, got {0}")]
    InvalidDuration(f32),

    #[error("Invalid start time: must be finite, got {0}")]
    InvalidStartTime(f32),

    #[error("Colour palette must contain at least one colour")]
    EmptyPalette,

    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Pyro operations
pub type Result<T> = std::result::Result<T, PyroError>;

impl From<toml::de::Error> for PyroError {
    fn from(err: toml::de::Error) -> Self {
        PyroError::TomlParseError(err.to_string())
    }
}
