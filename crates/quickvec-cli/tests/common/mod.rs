//! Shared helpers for quickvec integration tests
#![allow(dead_code)]

use quickvec_cli::Config;
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DATASET: &str = include_str!("../fixtures/jeopardy_sample.json");
pub const DATASET_PATH: &str = "/data/jeopardy_tiny.json";

/// Config pointing both the store and the dataset host at `server`
pub fn test_config(server: &MockServer, cache_dir: &Path) -> Config {
    Config {
        store_url: server.uri(),
        dataset_url: format!("{}{}", server.uri(), DATASET_PATH),
        cache_path: cache_dir.join("jeopardy_tiny.json"),
        timeout_secs: 5,
        ..Config::default()
    }
}

pub fn schema_body() -> Value {
    json!({
        "classes": [{
            "class": "Question",
            "vectorizer": "text2vec-openai",
            "properties": [
                {"name": "category", "dataType": ["text"]},
                {"name": "question", "dataType": ["text"]},
                {"name": "answer", "dataType": ["text"]}
            ]
        }]
    })
}

pub fn ok_entry() -> Value {
    json!({"class": "Question", "result": {}})
}

pub fn failed_entry(message: &str) -> Value {
    json!({"class": "Question", "result": {"errors": {"error": [{"message": message}]}}})
}

pub async fn mount_create_class(server: &MockServer, status: u16) {
    let template = if status == 422 {
        ResponseTemplate::new(422).set_body_json(json!({
            "error": [{"message": "class name \"Question\" already exists"}]
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({"class": "Question"}))
    };

    Mock::given(method("POST"))
        .and(path("/v1/schema"))
        .respond_with(template)
        .mount(server)
        .await;
}

pub async fn mount_schema(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/schema"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schema_body()))
        .mount(server)
        .await;
}

pub async fn mount_dataset(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(DATASET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(DATASET))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_batch(server: &MockServer, entries: Vec<Value>) {
    Mock::given(method("POST"))
        .and(path("/v1/batch/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(entries)))
        .mount(server)
        .await;
}
