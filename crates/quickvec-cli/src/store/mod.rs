//! Vector store access
//!
//! Schema management (create collection, read schema) and batch ingestion
//! over the store's REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ensure_batch_succeeded, StoreClient};
pub use types::*;
