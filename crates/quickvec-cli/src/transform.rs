//! Record to store-object transformation

use crate::config::{Config, DEFAULT_CLASS_NAME};
use crate::decode::Record;
use crate::error::{CliError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Dataset field name and the property it is stored under
pub const FIELD_MAPPING: [(&str, &str); 3] = [
    ("Category", "category"),
    ("Question", "question"),
    ("Answer", "answer"),
];

/// An object ready to be written to the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainObject {
    class: String,
    properties: Map<String, Value>,
}

impl DomainObject {
    pub fn new(class: impl Into<String>, properties: Map<String, Value>) -> Self {
        Self {
            class: class.into(),
            properties,
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Build a `Question` object from a record.
///
/// Never fails: fields missing from the record are simply absent from the
/// object's properties.
pub fn transform(record: &Record) -> DomainObject {
    transform_into(DEFAULT_CLASS_NAME, record)
}

/// Same as [`transform`] but targets `class`
pub fn transform_into(class: &str, record: &Record) -> DomainObject {
    let properties = FIELD_MAPPING
        .iter()
        .filter_map(|(field, property)| {
            record
                .get(field)
                .map(|value| (property.to_string(), Value::String(value.to_string())))
        })
        .collect();

    DomainObject::new(class, properties)
}

/// Like [`transform_into`] but fails on the first missing field
pub fn transform_strict(class: &str, record: &Record) -> Result<DomainObject> {
    if let Some((field, _)) = FIELD_MAPPING.iter().find(|(field, _)| record.get(field).is_none()) {
        return Err(CliError::validation(format!("missing field '{}'", field)));
    }
    Ok(transform_into(class, record))
}

/// Applies the configured transformation to every record
#[derive(Debug, Clone)]
pub struct Transformer {
    class_name: String,
    strict: bool,
}

impl Transformer {
    pub fn new(class_name: impl Into<String>, strict: bool) -> Self {
        Self {
            class_name: class_name.into(),
            strict,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.class_name.clone(), config.strict)
    }

    pub fn apply(&self, record: &Record) -> Result<DomainObject> {
        if self.strict {
            transform_strict(&self.class_name, record)
        } else {
            Ok(transform_into(&self.class_name, record))
        }
    }

    /// Transform all records, preserving order.
    ///
    /// In strict mode the error names the offending record's position.
    pub fn apply_all(&self, records: &[Record]) -> Result<Vec<DomainObject>> {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                self.apply(record).map_err(|e| match e {
                    CliError::Validation(msg) => {
                        CliError::validation(format!("record #{}: {}", i, msg))
                    },
                    other => other,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn liver() -> Record {
        [
            ("Category", "SCIENCE"),
            ("Question", "This organ..."),
            ("Answer", "Liver"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_transform_question() {
        let object = transform(&liver());
        assert_eq!(object.class(), "Question");
        assert_eq!(
            serde_json::to_value(&object).unwrap(),
            json!({
                "class": "Question",
                "properties": {
                    "category": "SCIENCE",
                    "question": "This organ...",
                    "answer": "Liver"
                }
            })
        );
    }

    #[test]
    fn test_transform_missing_fields_are_absent() {
        let record: Record = [("Question", "Only a question"), ("Round", "Jeopardy!")]
            .into_iter()
            .collect();

        let object = transform(&record);
        assert_eq!(object.properties().len(), 1);
        assert_eq!(object.property("question"), Some(&json!("Only a question")));
        assert!(object.property("answer").is_none());
        assert!(object.property("round").is_none());

        let empty = transform(&Record::new());
        assert!(empty.properties().is_empty());
    }

    #[test]
    fn test_strict_rejects_missing_field() {
        let mut record = Record::new();
        record.insert("Category", "SCIENCE");
        record.insert("Question", "q");

        let err = transform_strict("Question", &record).unwrap_err();
        assert!(err.to_string().contains("Answer"));
        assert!(transform_strict("Question", &liver()).is_ok());
    }

    #[test]
    fn test_transformer_reports_record_position() {
        let transformer = Transformer::new("Trivia", true);
        let records = vec![liver(), Record::new()];

        match transformer.apply_all(&records).unwrap_err() {
            CliError::Validation(msg) => assert!(msg.starts_with("record #1")),
            other => panic!("unexpected error: {other}"),
        }

        let lenient = Transformer::new("Trivia", false);
        let objects = lenient.apply_all(&records).unwrap();
        assert_eq!(objects.len(), 2);
        assert!(objects.iter().all(|o| o.class() == "Trivia"));
    }
}
