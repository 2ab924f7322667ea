//! quickvec CLI Library
//!
//! Loads a sample question dataset into a vector store collection.
//!
//! # Overview
//!
//! - **Schema management**: create the target collection, read the schema
//!   ([`store::StoreClient`])
//! - **Fetching**: download the dataset once into a local cache file
//!   ([`fetch::Fetcher`])
//! - **Decoding**: parse the dataset into ordered records ([`decode`])
//! - **Transforming**: map records onto store objects ([`transform`])
//! - **Ingesting**: batch-write the objects and check every result
//!
//! [`workflow::run`] chains these steps.

pub mod checksum;
pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod progress;
pub mod store;
pub mod transform;
pub mod workflow;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};

use clap::Parser;
use std::path::PathBuf;

/// quickvec - load the quickstart dataset into a vector store
#[derive(Parser, Debug)]
#[command(name = "quickvec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Vector store URL
    #[arg(long, env = "QUICKVEC_STORE_URL")]
    pub store_url: Option<String>,

    /// Dataset URL
    #[arg(long, env = "QUICKVEC_DATASET_URL")]
    pub dataset_url: Option<String>,

    /// Local cache file for the dataset
    #[arg(long, env = "QUICKVEC_CACHE_PATH")]
    pub cache_path: Option<PathBuf>,

    /// Expected SHA-256 of a fresh download
    #[arg(long, env = "QUICKVEC_DATASET_SHA256")]
    pub dataset_sha256: Option<String>,

    /// Collection to create and write to
    #[arg(long, env = "QUICKVEC_CLASS")]
    pub class: Option<String>,

    /// Vectorizer module for the collection
    #[arg(long, env = "QUICKVEC_VECTORIZER")]
    pub vectorizer: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "QUICKVEC_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Objects per batch request; default sends one batch
    #[arg(long, env = "QUICKVEC_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Reject records missing Category, Question or Answer
    #[arg(long, env = "QUICKVEC_STRICT")]
    pub strict: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref url) = self.store_url {
            config.store_url = url.clone();
        }
        if let Some(ref url) = self.dataset_url {
            config.dataset_url = url.clone();
        }
        if let Some(ref path) = self.cache_path {
            config.cache_path = path.clone();
        }
        if let Some(ref sha) = self.dataset_sha256 {
            config.dataset_sha256 = (!sha.is_empty()).then(|| sha.clone());
        }
        if let Some(ref class) = self.class {
            config.class_name = class.clone();
        }
        if let Some(ref vectorizer) = self.vectorizer {
            config.vectorizer = vectorizer.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(size) = self.batch_size {
            config.batch_size = Some(size);
        }
        if self.strict {
            config.strict = true;
        }
    }
}
