//! Dataset decoder
//!
//! The dataset is a JSON array of flat objects whose values are all strings.
//! It is parsed eagerly; record order follows the file.

use crate::error::{CliError, Result};
use crate::fetch::LocalResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufReader, Read};
use tracing::debug;

/// One dataset entry: field name to string value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

/// Decode a fetched dataset file
pub fn decode(resource: &LocalResource) -> Result<Vec<Record>> {
    let records = decode_reader(resource.open()?)?;
    debug!(path = %resource.path().display(), count = records.len(), "Decoded dataset");
    Ok(records)
}

/// Decode records from any reader
pub fn decode_reader<R: Read>(reader: R) -> Result<Vec<Record>> {
    serde_json::from_reader(BufReader::new(reader)).map_err(|e| {
        if e.is_io() {
            CliError::Io(e.into())
        } else {
            CliError::format(format!(
                "expected a JSON array of objects with string values ({})",
                e
            ))
        }
    })
}
