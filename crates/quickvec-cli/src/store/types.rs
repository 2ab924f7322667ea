//! Store request and response types
//!
//! Mirrors the subset of the store's REST schema used by the workflow.
//! Fields the workflow does not interpret are kept as raw JSON.

use crate::transform::DomainObject;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A collection (class) definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub class: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectorizer: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Value>,

    /// Remaining store-specific settings (index config, module config, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClassDefinition {
    pub fn new(class: impl Into<String>, vectorizer: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            vectorizer: Some(vectorizer.into()),
            properties: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Names of the declared properties, in schema order
    pub fn property_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter_map(|p| p.get("name").and_then(Value::as_str))
            .collect()
    }
}

/// Schema as returned by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
}

impl SchemaSnapshot {
    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.class == name)
    }
}

impl fmt::Display for SchemaSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.classes.is_empty() {
            return write!(f, "(no classes)");
        }
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} (vectorizer: {})",
                class.class,
                class.vectorizer.as_deref().unwrap_or("none")
            )?;
            let names = class.property_names();
            if !names.is_empty() {
                write!(f, " [{}]", names.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Whether a collection was created or already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    Created,
    AlreadyExists,
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionStatus::Created => f.write_str("created"),
            CollectionStatus::AlreadyExists => f.write_str("already exists"),
        }
    }
}

/// Batch write request body
#[derive(Debug, Serialize)]
pub struct BatchRequest<'a> {
    pub objects: &'a [DomainObject],
}

/// Store error body: `{"error": [{"message": "..."}]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Vec<ErrorMessage>,
}

impl ErrorResponse {
    pub fn messages(&self) -> Vec<String> {
        self.error.iter().map(|e| e.message.clone()).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// One entry of the batch write response
#[derive(Debug, Clone, Deserialize)]
pub struct BatchObjectResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub class: Option<String>,

    #[serde(default)]
    pub result: Option<ObjectResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectResult {
    #[serde(default)]
    pub errors: Option<ErrorResponse>,
}

/// Outcome of writing one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// Identifier the store assigned, if reported
    pub id: Option<String>,

    /// Empty on success
    pub errors: Vec<String>,
}

impl BatchResult {
    pub fn success(id: Option<String>) -> Self {
        Self {
            id,
            errors: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<BatchObjectResponse> for BatchResult {
    fn from(response: BatchObjectResponse) -> Self {
        let errors = response
            .result
            .and_then(|r| r.errors)
            .map(|e| e.messages())
            .unwrap_or_default();

        Self {
            id: response.id,
            errors,
        }
    }
}
