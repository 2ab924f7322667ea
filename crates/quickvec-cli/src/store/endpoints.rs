//! Store endpoint URL builders

fn trimmed(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Build schema endpoint URL (create class / get schema)
pub fn schema_url(base_url: &str) -> String {
    format!("{}/v1/schema", trimmed(base_url))
}

/// Build batch object write URL
pub fn batch_objects_url(base_url: &str) -> String {
    format!("{}/v1/batch/objects", trimmed(base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_url() {
        assert_eq!(schema_url("http://localhost:8080"), "http://localhost:8080/v1/schema");
        assert_eq!(schema_url("http://localhost:8080/"), "http://localhost:8080/v1/schema");
    }

    #[test]
    fn test_batch_objects_url() {
        assert_eq!(
            batch_objects_url("https://store.example.com"),
            "https://store.example.com/v1/batch/objects"
        );
    }
}
