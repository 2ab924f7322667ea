//! Error types shared by quickvec crates

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, CommonError>;

/// Errors raised while setting up shared infrastructure
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A logging setting (level, output, format) could not be parsed
    #[error("Invalid logging setting '{key}': {value}")]
    InvalidSetting { key: String, value: String },

    #[error("Invalid log filter directive: {0}")]
    Filter(String),

    /// The global subscriber was already installed
    #[error("Failed to install log subscriber: {0}")]
    Subscriber(String),
}

impl CommonError {
    /// Create an invalid setting error
    pub fn invalid_setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
        }
    }
}
