//! Error types for suite configuration

use thiserror::Error;

/// Result type alias using ConfigError
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    #[error("Environment variable {var} is not valid: {reason}")]
    InvalidVar { var: String, reason: String },

    #[error("No credentials configured for {0}")]
    NoCredentials(String),
}
