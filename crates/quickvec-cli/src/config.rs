//! Configuration for the quickstart workflow
//!
//! Built once at startup (defaults, then environment, then CLI flags) and
//! passed by reference to each component. Nothing reads the environment
//! after this point.

use crate::error::{CliError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default vector store endpoint
pub const DEFAULT_STORE_URL: &str = "http://localhost:8080";

/// Sample dataset served by the quickstart tutorial repository
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/weaviate-tutorials/quickstart/main/data/jeopardy_tiny.json";

/// Local cache file for the dataset, relative to the working directory
pub const DEFAULT_CACHE_PATH: &str = "jeopardy_tiny.json";

pub const DEFAULT_CLASS_NAME: &str = "Question";

pub const DEFAULT_VECTORIZER: &str = "text2vec-openai";

/// Timeout applied to every outbound request, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Header names the store reads provider API keys from
pub const OPENAI_KEY_HEADER: &str = "X-OpenAI-Api-Key";
pub const COHERE_KEY_HEADER: &str = "X-Cohere-Api-Key";
pub const HUGGINGFACE_KEY_HEADER: &str = "X-HuggingFace-Api-Key";

/// Workflow configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the vector store (scheme + host)
    pub store_url: String,

    pub openai_api_key: String,
    pub cohere_api_key: String,
    pub huggingface_api_key: String,

    /// Where the dataset is downloaded from when not cached
    pub dataset_url: String,

    /// Local cache file for the dataset
    pub cache_path: PathBuf,

    /// Expected SHA-256 (hex) of a freshly downloaded dataset
    pub dataset_sha256: Option<String>,

    /// Collection the objects are written to
    pub class_name: String,

    /// Vectorizer module configured on the collection
    pub vectorizer: String,

    pub timeout_secs: u64,

    /// Objects per batch request; `None` sends everything in one request
    pub batch_size: Option<usize>,

    /// Reject records that lack one of the known fields
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            openai_api_key: String::new(),
            cohere_api_key: String::new(),
            huggingface_api_key: String::new(),
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            dataset_sha256: None,
            class_name: DEFAULT_CLASS_NAME.to_string(),
            vectorizer: DEFAULT_VECTORIZER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            batch_size: None,
            strict: false,
        }
    }
}

impl Config {
    /// Load config from environment variables on top of the defaults
    ///
    /// Variables: `QUICKVEC_STORE_URL`, `OPENAI_APIKEY`, `COHERE_APIKEY`,
    /// `HUGGINGFACE_APIKEY`, `QUICKVEC_DATASET_URL`, `QUICKVEC_CACHE_PATH`,
    /// `QUICKVEC_DATASET_SHA256`, `QUICKVEC_CLASS`, `QUICKVEC_VECTORIZER`,
    /// `QUICKVEC_TIMEOUT_SECS`, `QUICKVEC_BATCH_SIZE`, `QUICKVEC_STRICT`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("QUICKVEC_STORE_URL") {
            config.store_url = url;
        }

        if let Ok(key) = std::env::var("OPENAI_APIKEY") {
            config.openai_api_key = key;
        }

        if let Ok(key) = std::env::var("COHERE_APIKEY") {
            config.cohere_api_key = key;
        }

        if let Ok(key) = std::env::var("HUGGINGFACE_APIKEY") {
            config.huggingface_api_key = key;
        }

        if let Ok(url) = std::env::var("QUICKVEC_DATASET_URL") {
            config.dataset_url = url;
        }

        if let Ok(path) = std::env::var("QUICKVEC_CACHE_PATH") {
            config.cache_path = PathBuf::from(path);
        }

        if let Ok(sha) = std::env::var("QUICKVEC_DATASET_SHA256") {
            if !sha.is_empty() {
                config.dataset_sha256 = Some(sha);
            }
        }

        if let Ok(class) = std::env::var("QUICKVEC_CLASS") {
            config.class_name = class;
        }

        if let Ok(vectorizer) = std::env::var("QUICKVEC_VECTORIZER") {
            config.vectorizer = vectorizer;
        }

        if let Ok(secs) = std::env::var("QUICKVEC_TIMEOUT_SECS") {
            config.timeout_secs = parse_env("QUICKVEC_TIMEOUT_SECS", &secs)?;
        }

        if let Ok(size) = std::env::var("QUICKVEC_BATCH_SIZE") {
            config.batch_size = Some(parse_env("QUICKVEC_BATCH_SIZE", &size)?);
        }

        if let Ok(strict) = std::env::var("QUICKVEC_STRICT") {
            config.strict = parse_env("QUICKVEC_STRICT", &strict)?;
        }

        Ok(config)
    }

    /// Check that URLs parse and numeric limits are usable
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("store URL", &self.store_url), ("dataset URL", &self.dataset_url)] {
            let url = Url::parse(value)
                .map_err(|e| CliError::config(format!("invalid {} '{}': {}", name, value, e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(CliError::config(format!(
                    "{} '{}' must use http or https",
                    name, value
                )));
            }
        }

        if self.class_name.is_empty() {
            return Err(CliError::config("class name must not be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(CliError::config("timeout must be at least one second"));
        }

        if self.batch_size == Some(0) {
            return Err(CliError::config("batch size must be greater than zero"));
        }

        Ok(())
    }

    /// Provider key headers sent with every store request.
    ///
    /// Empty keys are passed through unchanged.
    pub fn auth_headers(&self) -> [(&'static str, &str); 3] {
        [
            (OPENAI_KEY_HEADER, self.openai_api_key.as_str()),
            (COHERE_KEY_HEADER, self.cohere_api_key.as_str()),
            (HUGGINGFACE_KEY_HEADER, self.huggingface_api_key.as_str()),
        ]
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::config(format!("{} has invalid value '{}'", name, value)))
}
