//! Error types for the quickvec CLI
//!
//! Every failure in the quickstart workflow maps onto one of these variants.
//! Only [`CliError::SchemaConflict`] is recovered from (inside
//! `ensure_collection`); everything else propagates to `main`, which prints
//! the message and exits non-zero.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The remote store or dataset host could not be reached, or answered
    /// with a non-success status
    #[error("Network error: {0}. Check that the host is reachable and the URL is correct.")]
    Network(String),

    #[error("Network request failed: {0}. Check your connection and the configured URLs.")]
    Http(#[from] reqwest::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// The store answered a request with an error status
    #[error("Store error: {0}")]
    Api(String),

    /// Dataset content is not a JSON array of flat string records
    #[error("Malformed dataset: {0}")]
    Format(String),

    /// The store rejected an object in a batch write
    #[error("Batch write rejected object #{index}: {message}")]
    RemoteValidation { index: usize, message: String },

    /// The collection being created already exists
    #[error("Collection already exists: {0}")]
    SchemaConflict(String),

    /// A record is missing a field required by strict transformation
    #[error("Invalid record: {0}")]
    Validation(String),

    #[error("Checksum verification failed for '{file}': expected '{expected}', got '{actual}'. The download was discarded.")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables and flags.")]
    Config(String),
}

impl CliError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a store API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a dataset format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a remote validation error for the object at `index`
    pub fn remote_validation(index: usize, message: impl Into<String>) -> Self {
        Self::RemoteValidation {
            index,
            message: message.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a checksum mismatch error
    pub fn checksum_mismatch(
        file: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ChecksumMismatch {
            file: file.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
