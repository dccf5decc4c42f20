//! CSV downloaded over HTTP
//!
//! The body is written to `download_dir` first and then parsed from there,
//! so the downloaded copy can be inspected after the run.
//! Uses ureq (sync HTTP) with a global timeout so a dead host cannot hang the run.

use super::local::read_column;
use super::RowSource;
use crate::error::{ReportError, ReportResult};
use crate::models::Observations;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// File name used when the URL path has no usable last segment
const DEFAULT_DOWNLOAD_NAME: &str = "download.csv";

#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: String,
    download_dir: PathBuf,
    timeout: Duration,
    delimiter: u8,
}

impl RemoteSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: impl Into<String>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            download_dir: download_dir.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            delimiter: b',',
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Where the downloaded body is stored
    pub fn download_path(&self) -> PathBuf {
        self.download_dir.join(file_name_from_url(&self.url))
    }

    fn download(&self) -> ReportResult<PathBuf> {
        let agent: ureq::Agent = ureq::config::Config::builder()
            .http_status_as_error(false) // status handled below so the URL ends up in the error
            .timeout_global(Some(self.timeout))
            .build()
            .new_agent();

        info!("Downloading {}", self.url);
        let response = agent
            .get(self.url.as_str())
            .call()
            .map_err(|e| ReportError::source_unavailable(&self.url, e))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ReportError::source_unavailable(
                &self.url,
                format!("HTTP status {status}"),
            ));
        }

        let body = response
            .into_body()
            .read_to_vec()
            .map_err(|e| ReportError::source_unavailable(&self.url, e))?;

        fs::create_dir_all(&self.download_dir).map_err(|e| {
            ReportError::unexpected(
                format!("creating download directory {}", self.download_dir.display()),
                e,
            )
        })?;
        let path = self.download_path();
        fs::write(&path, &body).map_err(|e| {
            ReportError::unexpected(format!("saving download to {}", path.display()), e)
        })?;

        debug!(bytes = body.len(), "Saved {} to {}", self.url, path.display());
        Ok(path)
    }
}

impl RowSource for RemoteSource {
    fn location(&self) -> String {
        self.url().to_string()
    }

    fn fetch(&self, column: &str) -> ReportResult<Observations> {
        let path = self.download()?;
        let file = File::open(&path).map_err(|e| {
            ReportError::unexpected(format!("reopening downloaded file {}", path.display()), e)
        })?;
        read_column(file, column, self.delimiter, &self.url)
    }
}

/// Last path segment of `url`, ignoring query and fragment
fn file_name_from_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();
    let after_scheme = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);

    after_scheme
        .split_once('/')
        .and_then(|(_, path)| path.rsplit('/').next())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve exactly one HTTP response on an ephemeral port
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            // Drain request headers
            while reader.read_line(&mut line).unwrap_or(0) > 0 {
                if line == "\r\n" || line == "\n" {
                    break;
                }
                line.clear();
            }
            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });
        format!("http://{addr}/exports/places.csv?token=abc")
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://example.com/a/b/places.csv?x=1"),
            "places.csv"
        );
        assert_eq!(file_name_from_url("https://example.com/data.csv#top"), "data.csv");
        assert_eq!(file_name_from_url("https://example.com"), DEFAULT_DOWNLOAD_NAME);
        assert_eq!(file_name_from_url("https://example.com/dir/"), DEFAULT_DOWNLOAD_NAME);
        assert_eq!(file_name_from_url("https://example.com/.."), DEFAULT_DOWNLOAD_NAME);
    }

    #[test]
    fn test_download_then_read() {
        let url = serve_once("200 OK", "Place,Age\nLibrary,3\n cafe ,4\n");
        let dir = tempfile::tempdir().unwrap();
        let source = RemoteSource::new(&url, dir.path()).with_timeout(Duration::from_secs(5));

        let obs = source.fetch("Place").unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(source.location(), url);
        assert!(dir.path().join("places.csv").exists());
    }

    #[test]
    fn test_http_error_status_is_source_unavailable() {
        let url = serve_once("404 Not Found", "missing");
        let dir = tempfile::tempdir().unwrap();
        let err = RemoteSource::new(&url, dir.path())
            .with_timeout(Duration::from_secs(5))
            .fetch("Place")
            .unwrap_err();
        assert_eq!(err.kind(), "source-unavailable");
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains(&url));
    }

    #[test]
    fn test_unreachable_host_is_source_unavailable() {
        // Bind then drop to get a port nothing listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let dir = tempfile::tempdir().unwrap();
        let err = RemoteSource::new(format!("http://127.0.0.1:{port}/places.csv"), dir.path())
            .with_timeout(Duration::from_secs(5))
            .fetch("Place")
            .unwrap_err();
        assert_eq!(err.kind(), "source-unavailable");
    }

    #[test]
    fn test_missing_column_names_url() {
        let url = serve_once("200 OK", "Lugar\nParque\n");
        let dir = tempfile::tempdir().unwrap();
        let err = RemoteSource::new(&url, dir.path())
            .with_timeout(Duration::from_secs(5))
            .fetch("Place")
            .unwrap_err();
        match err {
            ReportError::MissingColumn { location, .. } => assert_eq!(location, url),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
