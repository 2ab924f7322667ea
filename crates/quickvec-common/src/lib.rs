//! quickvec Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared logging setup and error types for the quickvec workspace.
//!
//! # Example
//!
//! ```no_run
//! use quickvec_common::logging::{init_logging, LogConfig, LogLevel};
//!
//! fn main() -> quickvec_common::Result<()> {
//!     let config = LogConfig::builder().level(LogLevel::Debug).build();
//!     init_logging(&config)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{CommonError, Result};
