//! HTTP client for the vector store
//!
//! Covers the three calls the workflow needs: create a collection, read the
//! schema, and write objects in batches. Provider API keys travel as default
//! headers on every request.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::store::endpoints;
use crate::store::types::{
    BatchObjectResponse, BatchRequest, BatchResult, ClassDefinition, CollectionStatus,
    ErrorResponse, SchemaSnapshot,
};
use crate::transform::DomainObject;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Vector store API client
pub struct StoreClient {
    client: Client,
    base_url: String,
}

impl StoreClient {
    /// Create a client for `base_url` sending `headers` with every request
    pub fn new(base_url: impl Into<String>, headers: &[(&str, &str)], timeout: Duration) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CliError::config(format!("invalid header name '{}': {}", name, e)))?;
            let mut value = HeaderValue::from_str(value)
                .map_err(|e| CliError::config(format!("invalid value for header '{}': {}", name, e)))?;
            value.set_sensitive(true);
            default_headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.store_url.clone(), &config.auth_headers(), config.timeout())
    }

    /// Make sure collection `name` exists.
    ///
    /// A conflict with an existing collection is logged and reported as
    /// [`CollectionStatus::AlreadyExists`]; every other failure is returned.
    pub async fn ensure_collection(&self, name: &str, vectorizer: &str) -> Result<CollectionStatus> {
        match self.create_collection(name, vectorizer).await {
            Ok(()) => {
                info!(class = %name, vectorizer = %vectorizer, "Collection created");
                Ok(CollectionStatus::Created)
            },
            Err(CliError::SchemaConflict(detail)) => {
                warn!(class = %name, detail = %detail, "Collection already exists, continuing");
                Ok(CollectionStatus::AlreadyExists)
            },
            Err(e) => Err(e),
        }
    }

    /// Create collection `name`, failing with [`CliError::SchemaConflict`]
    /// if it already exists
    pub async fn create_collection(&self, name: &str, vectorizer: &str) -> Result<()> {
        let url = endpoints::schema_url(&self.base_url);
        let body = ClassDefinition::new(name, vectorizer);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("POST", &url, e))?;

        if response.status().is_success() {
            return Ok(());
        }

        let (status, messages) = rejection(response).await;
        let detail = messages.join("; ");
        if status == StatusCode::UNPROCESSABLE_ENTITY
            && messages.iter().any(|m| m.contains("already exists"))
        {
            return Err(CliError::SchemaConflict(detail));
        }

        Err(CliError::api(format!(
            "creating collection '{}' failed with {}: {}",
            name, status, detail
        )))
    }

    /// Fetch the current schema
    pub async fn fetch_schema(&self) -> Result<SchemaSnapshot> {
        let url = endpoints::schema_url(&self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error("GET", &url, e))?;

        if !response.status().is_success() {
            let (status, messages) = rejection(response).await;
            return Err(CliError::api(format!(
                "reading schema failed with {}: {}",
                status,
                messages.join("; ")
            )));
        }

        let schema: SchemaSnapshot = response
            .json()
            .await
            .map_err(|e| CliError::api(format!("unreadable schema response: {}", e)))?;

        debug!(classes = schema.classes.len(), "Schema fetched");
        Ok(schema)
    }

    /// Write `objects` in a single request.
    ///
    /// Returns one result per object in submission order. Per-object
    /// failures are reported in the results, not as an error; see
    /// [`ensure_batch_succeeded`].
    pub async fn ingest_batch(&self, objects: &[DomainObject]) -> Result<Vec<BatchResult>> {
        if objects.is_empty() {
            return Ok(Vec::new());
        }

        let url = endpoints::batch_objects_url(&self.base_url);
        debug!(count = objects.len(), "Submitting batch");

        let response = self
            .client
            .post(&url)
            .json(&BatchRequest { objects })
            .send()
            .await
            .map_err(|e| transport_error("POST", &url, e))?;

        if !response.status().is_success() {
            let (status, messages) = rejection(response).await;
            return Err(CliError::api(format!(
                "batch write failed with {}: {}",
                status,
                messages.join("; ")
            )));
        }

        let entries: Vec<BatchObjectResponse> = response
            .json()
            .await
            .map_err(|e| CliError::api(format!("unreadable batch response: {}", e)))?;

        if entries.len() != objects.len() {
            return Err(CliError::remote_validation(
                entries.len().min(objects.len()),
                format!(
                    "store returned {} results for {} submitted objects",
                    entries.len(),
                    objects.len()
                ),
            ));
        }

        Ok(entries.into_iter().map(BatchResult::from).collect())
    }

    /// Write all objects, `batch_size` per request (`None`: one request).
    ///
    /// Each batch is checked before the next is sent, so the first rejected
    /// object ends the run. Returns the number of objects written.
    pub async fn ingest_all(&self, objects: &[DomainObject], batch_size: Option<usize>) -> Result<usize> {
        let chunk_len = batch_size.unwrap_or(objects.len()).max(1);
        let mut written = 0;

        for chunk in objects.chunks(chunk_len) {
            let results = self.ingest_batch(chunk).await?;
            check_results(&results, written)?;
            written += results.len();
            debug!(written, total = objects.len(), "Batch accepted");
        }

        Ok(written)
    }
}

/// Fail on the first result carrying errors.
///
/// Results after the first failure are not examined.
pub fn ensure_batch_succeeded(results: &[BatchResult]) -> Result<()> {
    check_results(results, 0)
}

fn check_results(results: &[BatchResult], offset: usize) -> Result<()> {
    for (i, result) in results.iter().enumerate() {
        if let Some(message) = result.errors.first() {
            return Err(CliError::remote_validation(offset + i, message.clone()));
        }
    }
    Ok(())
}

fn transport_error(method: &str, url: &str, e: reqwest::Error) -> CliError {
    if e.is_timeout() {
        CliError::network(format!("{} {} timed out", method, url))
    } else {
        CliError::network(format!("{} {} failed: {}", method, url, e))
    }
}

/// Status and error messages of a failed response
async fn rejection(response: Response) -> (StatusCode, Vec<String>) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let messages = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) if !parsed.error.is_empty() => parsed.messages(),
        _ if !body.trim().is_empty() => vec![body.trim().to_string()],
        _ => vec![status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()],
    };

    (status, messages)
}
