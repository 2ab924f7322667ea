//! Dataset fetcher with a write-once local cache
//!
//! A local path acts as the cache key for a remote URL: if the path exists
//! and is a regular file it is used as-is, with no freshness or content
//! check. Otherwise the URL is downloaded into it exactly once.

use crate::checksum;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress;
use futures::StreamExt;
use reqwest::Client;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// A dataset file present on local disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalResource {
    path: PathBuf,
    from_cache: bool,
    size: u64,
}

impl LocalResource {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when no network access was needed to produce this resource
    pub fn from_cache(&self) -> bool {
        self.from_cache
    }

    /// Size in bytes at the time the resource was obtained
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Open the file for reading
    pub fn open(&self) -> Result<File> {
        Ok(File::open(&self.path)?)
    }
}

/// Whether `path` can serve as a cache hit: it exists and is not a directory
pub fn is_cached(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

/// Downloads remote datasets into local cache files
pub struct Fetcher {
    client: Client,
    expected_sha256: Option<String>,
}

impl Fetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quickvec/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            expected_sha256: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = Self::new(config.timeout())?;
        Ok(match config.dataset_sha256 {
            Some(ref sha) => fetcher.with_checksum(sha.clone()),
            None => fetcher,
        })
    }

    /// Verify fresh downloads against this SHA-256 before caching them.
    ///
    /// Files already in the cache are never re-verified.
    pub fn with_checksum(mut self, sha256: impl Into<String>) -> Self {
        self.expected_sha256 = Some(sha256.into());
        self
    }

    /// Make sure `local_path` holds the content of `url`.
    ///
    /// A cache hit performs no network access. On a miss the body is
    /// streamed to a temporary file next to `local_path` and renamed into
    /// place only after it is complete (and verified, if a checksum is set),
    /// so failures never leave a partial cache file behind. A non-2xx status
    /// fails before anything is written.
    pub async fn ensure(&self, url: &str, local_path: impl AsRef<Path>) -> Result<LocalResource> {
        let local_path = local_path.as_ref();

        if is_cached(local_path) {
            let size = std::fs::metadata(local_path)?.len();
            debug!(path = %local_path.display(), size, "Using cached dataset");
            return Ok(LocalResource {
                path: local_path.to_path_buf(),
                from_cache: true,
                size,
            });
        }

        let url = Url::parse(url)
            .map_err(|e| CliError::config(format!("invalid download URL '{}': {}", url, e)))?;

        info!(url = %url, path = %local_path.display(), "Downloading dataset");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CliError::network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CliError::network(format!("GET {} returned {}", url, status)));
        }

        let dir = match local_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent)?;
                parent
            },
            _ => Path::new("."),
        };
        let mut partial = tempfile::NamedTempFile::new_in(dir)?;

        let label = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url.to_string());
        let pb = progress::create_download_progress(response.content_length(), &label);

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| CliError::network(format!("download of {} interrupted: {}", url, e)))?;
            partial.write_all(&chunk)?;
            written += chunk.len() as u64;
            pb.set_position(written);
        }
        partial.flush()?;
        pb.finish_and_clear();

        if let Some(ref expected) = self.expected_sha256 {
            checksum::verify_file_checksum(partial.path(), expected).map_err(|e| match e {
                CliError::ChecksumMismatch {
                    expected, actual, ..
                } => CliError::checksum_mismatch(local_path.display().to_string(), expected, actual),
                other => other,
            })?;
        }

        partial
            .persist(local_path)
            .map_err(|e| CliError::Io(e.error))?;

        info!(
            path = %local_path.display(),
            size = %progress::format_bytes(written),
            "Dataset cached"
        );

        Ok(LocalResource {
            path: local_path.to_path_buf(),
            from_cache: false,
            size: written,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BODY: &str = r#"[{"Category":"SCIENCE","Question":"This organ removes excess glucose from the blood & stores it as glycogen","Answer":"Liver"}]"#;

    fn fetcher() -> Fetcher {
        Fetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_is_cached_ignores_directories() {
        let dir = TempDir::new().unwrap();
        assert!(!is_cached(dir.path()));
        assert!(!is_cached(&dir.path().join("missing.json")));

        let file = dir.path().join("data.json");
        std::fs::write(&file, "[]").unwrap();
        assert!(is_cached(&file));
    }

    #[tokio::test]
    async fn test_second_ensure_uses_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("data.json");
        let url = format!("{}/data.json", server.uri());

        let first = fetcher().ensure(&url, &target).await.unwrap();
        assert!(!first.from_cache());
        assert_eq!(first.size(), BODY.len() as u64);

        let second = fetcher().ensure(&url, &target).await.unwrap();
        assert!(second.from_cache());
        assert_eq!(std::fs::read_to_string(second.path()).unwrap(), BODY);
    }

    #[tokio::test]
    async fn test_cached_file_wins_regardless_of_url() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("data.json");
        std::fs::write(&target, b"cached bytes").unwrap();

        // Nothing listens here; a request would fail
        let resource = fetcher()
            .ensure("http://127.0.0.1:9/never", &target)
            .await
            .unwrap();

        assert!(resource.from_cache());
        assert_eq!(std::fs::read(resource.path()).unwrap(), b"cached bytes");
    }

    #[tokio::test]
    async fn test_not_found_creates_no_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("data.json");
        let err = fetcher()
            .ensure(&format!("{}/data.json", server.uri()), &target)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Network(_)));
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_directory_at_path_is_not_a_cache_hit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("data.json");
        std::fs::create_dir(&target).unwrap();

        let result = fetcher()
            .ensure(&format!("{}/data.json", server.uri()), &target)
            .await;

        // Downloads, then cannot replace a directory with a file
        assert!(matches!(result, Err(CliError::Io(_))));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_checksum_mismatch_discards_download() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("data.json");
        let err = fetcher()
            .with_checksum("0000")
            .ensure(&format!("{}/data.json", server.uri()), &target)
            .await
            .unwrap_err();

        match err {
            CliError::ChecksumMismatch { file, .. } => assert!(file.ends_with("data.json")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_truncated_body_leaves_no_partial_file() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        // Announces more bytes than it sends, then hangs up
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 4096\r\n\r\n[{\"Category\":")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let dir = TempDir::new().unwrap();
        let cache_dir = dir.path().join("cache");
        let target = cache_dir.join("data.json");
        let err = fetcher()
            .ensure(&format!("http://{}/data.json", addr), &target)
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, CliError::Network(ref msg) if msg.contains("interrupted")));
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("cache").join("nested").join("data.json");
        let resource = fetcher()
            .ensure(&format!("{}/data.json", server.uri()), &target)
            .await
            .unwrap();

        assert_eq!(resource.path(), target.as_path());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "[]");
    }
}
