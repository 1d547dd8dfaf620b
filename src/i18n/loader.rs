//! Translation document loading and parsing.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use serde_json::error::Category;

use crate::i18n::translations::{TranslationMap, TranslationTable};

/// Where the translation document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslationSource {
    /// Local JSON file.
    File(PathBuf),
    /// Remote JSON document fetched with a single GET.
    Url(String),
}

impl TranslationSource {
    /// What: Interpret a user-supplied location as a file path or URL.
    ///
    /// Inputs:
    /// - `location`: Path or `http(s)://` URL
    ///
    /// Output:
    /// - `TranslationSource::Url` for http/https, `TranslationSource::File` otherwise
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for TranslationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// What: Error type for translation document loading.
///
/// Details:
/// - Every variant is recoverable: callers log it and keep the empty table.
#[derive(Debug)]
pub enum LoadError {
    /// The local file could not be read.
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The server answered with a non-success status.
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request failed before a response was received.
    Network(reqwest::Error),
    /// The body was not valid JSON.
    Parse(serde_json::Error),
    /// The JSON was valid but not shaped `{ lang: { key: text } }`.
    Shape(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to read translation file {}: {source}", path.display())
            }
            Self::Status { url, status } => {
                write!(f, "Translation request to {url} returned status {status}")
            }
            Self::Network(err) => write!(f, "Translation request failed: {err}"),
            Self::Parse(err) => write!(f, "Failed to parse translation JSON: {err}"),
            Self::Shape(msg) => write!(f, "Unexpected translation document shape: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Network(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Status { .. } | Self::Shape(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value)
    }
}

/// Raw translation document: language code -> label tree.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct TranslationDocument(BTreeMap<String, Value>);

/// What: Map a `serde_json` failure onto `LoadError`.
///
/// Details:
/// - Valid JSON of the wrong type is a shape error; anything else is a parse error
fn classify_json_error(err: serde_json::Error) -> LoadError {
    match err.classify() {
        Category::Data => LoadError::Shape(format!(
            "top level must be an object keyed by language code ({err})"
        )),
        Category::Io | Category::Syntax | Category::Eof => LoadError::Parse(err),
    }
}

/// What: Parse a translation document into a `TranslationTable`.
///
/// Inputs:
/// - `json_content`: Document text shaped `{ "en": { "key": "text" }, "ja": { ... } }`
///
/// Output:
/// - `Result<TranslationTable, LoadError>`
///
/// # Errors
/// - Returns `Err(LoadError::Shape)` when the content is blank or the top level is not an object
/// - Returns `Err(LoadError::Parse)` when the content is not valid JSON
///
/// Details:
/// - The document deserializes into `TranslationDocument`; each language tree is then flattened
/// - Language entries that are not objects are skipped with a warning
/// - Nested objects are flattened into dot-notation keys
/// - Numbers and booleans are stored as their text form; nulls are dropped
pub fn parse_translation_json(json_content: &str) -> Result<TranslationTable, LoadError> {
    if json_content.trim().is_empty() {
        return Err(LoadError::Shape("document is empty".to_string()));
    }

    let TranslationDocument(languages) =
        serde_json::from_str(json_content).map_err(classify_json_error)?;

    let mut parsed = Vec::with_capacity(languages.len());
    for (code, value) in languages {
        if !value.is_object() {
            tracing::warn!(language = %code, "skipping non-object language entry");
            continue;
        }
        let mut map = TranslationMap::new();
        flatten_json_value(&value, "", &mut map);
        parsed.push((code, map));
    }

    Ok(TranslationTable::from_languages(parsed))
}

/// What: Recursively flatten a JSON value into dot-notation keys.
///
/// Inputs:
/// - `value`: Current JSON value
/// - `prefix`: Current key prefix (e.g., "status")
/// - `translations`: Map to populate
fn flatten_json_value(value: &Value, prefix: &str, translations: &mut TranslationMap) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_json_value(val, &new_prefix, translations);
            }
        }
        Value::String(s) => {
            translations.insert(prefix.to_string(), s.clone());
        }
        Value::Number(n) => {
            translations.insert(prefix.to_string(), n.to_string());
        }
        Value::Bool(b) => {
            translations.insert(prefix.to_string(), b.to_string());
        }
        Value::Array(_) => {
            translations.insert(prefix.to_string(), value.to_string());
        }
        Value::Null => {}
    }
}

/// What: Load a translation document from a local file.
///
/// # Errors
/// - Returns `Err(LoadError::Io)` when the file cannot be read
/// - Returns parse errors from `parse_translation_json`
pub fn load_translation_file(path: &Path) -> Result<TranslationTable, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_translation_json(&contents)
}

/// What: Fetch a translation document with a single GET request.
///
/// Inputs:
/// - `client`: Shared HTTP client
/// - `url`: Document URL
///
/// # Errors
/// - Returns `Err(LoadError::Network)` on connection or body read failure
/// - Returns `Err(LoadError::Status)` for non-success responses
/// - Returns parse errors from `parse_translation_json`
///
/// Details:
/// - No caching, conditional requests or retries
pub async fn fetch_translation_url(
    client: &reqwest::Client,
    url: &str,
) -> Result<TranslationTable, LoadError> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    tracing::info!(
        status = status.as_u16(),
        bytes = body.len(),
        "fetched translation document"
    );
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    parse_translation_json(&body)
}

/// What: Load the translation document from any source.
///
/// # Errors
/// - See `load_translation_file` and `fetch_translation_url`
pub async fn load_translations(source: &TranslationSource) -> Result<TranslationTable, LoadError> {
    let result = match source {
        TranslationSource::File(path) => load_translation_file(path),
        TranslationSource::Url(url) => {
            let client = reqwest::Client::builder()
                .user_agent(concat!("shibuya-view/", env!("CARGO_PKG_VERSION")))
                .build()?;
            fetch_translation_url(&client, url).await
        }
    };
    if let Ok(table) = &result {
        tracing::debug!(
            source = %source,
            languages = ?table.language_codes(),
            "translation document loaded"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use tempfile::TempDir;

    /// What: Serve one canned HTTP response per accepted connection on a loopback port.
    ///
    /// Output:
    /// - URL of the served translation document
    fn serve_once(status: u16, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read listener address");
        std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let reason = if status == 200 { "OK" } else { "Not Found" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        });
        format!("http://{addr}/translations.json")
    }

    fn direct_client() -> reqwest::Client {
        reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to build test client")
    }

    #[tokio::test]
    /// What: A 200 response is parsed into a table.
    ///
    /// Inputs:
    /// - Loopback server answering 200 with a two-language document.
    ///
    /// Output:
    /// - Table whose `ja` title is the served text.
    async fn test_fetch_translation_url_success() {
        let url = serve_once(200, r#"{"en":{"title":"Hi"},"ja":{"title":"やあ"}}"#);
        let table = fetch_translation_url(&direct_client(), &url)
            .await
            .expect("Failed to fetch served document");
        assert_eq!(table.lookup("ja", "title"), Some("やあ"));
        assert_eq!(table.lookup("en", "title"), Some("Hi"));
    }

    #[tokio::test]
    /// What: A non-success status maps to `LoadError::Status`.
    ///
    /// Inputs:
    /// - Loopback server answering 404.
    ///
    /// Output:
    /// - `LoadError::Status` carrying the URL and 404.
    async fn test_fetch_translation_url_status_error() {
        let url = serve_once(404, "not here");
        let err = fetch_translation_url(&direct_client(), &url)
            .await
            .expect_err("404 must fail");
        match &err {
            LoadError::Status { url: failed, status } => {
                assert_eq!(*status, 404);
                assert_eq!(failed, &url);
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(err.to_string().contains("returned status 404"));
    }

    #[tokio::test]
    /// What: A refused connection maps to `LoadError::Network`.
    ///
    /// Inputs:
    /// - URL of a loopback port whose listener has been dropped.
    ///
    /// Output:
    /// - `LoadError::Network` with a source error.
    async fn test_fetch_translation_url_network_error() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .expect("Failed to reserve a port");
        let url = format!("http://{addr}/translations.json");
        let err = fetch_translation_url(&direct_client(), &url)
            .await
            .expect_err("closed port must fail");
        assert!(matches!(err, LoadError::Network(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    /// What: A flat document parses into per-language maps.
    fn test_parse_translation_json() {
        let json = r#"{
            "en": { "title": "Shibuya", "stop-rotation-label": "Stop Rotation" },
            "ja": { "title": "渋谷", "stop-rotation-label": "回転停止" }
        }"#;
        let table = parse_translation_json(json).expect("Failed to parse test document");
        assert_eq!(table.lookup("en", "title"), Some("Shibuya"));
        assert_eq!(table.lookup("ja", "stop-rotation-label"), Some("回転停止"));
        assert_eq!(table.language_codes(), vec!["en", "ja"]);
    }

    #[test]
    /// What: Nested objects flatten to dotted keys and scalars become strings.
    ///
    /// Inputs:
    /// - Nested object, number, boolean and null values.
    ///
    /// Output:
    /// - Dotted keys with stringified scalars; null and non-object languages dropped.
    fn test_parse_translation_json_nested_and_scalars() {
        let json = r#"{
            "en": { "status": { "lat": "Latitude" }, "zoom": 3, "beta": true, "gone": null },
            "de": "not an object"
        }"#;
        let table = parse_translation_json(json).expect("Failed to parse test document");
        assert_eq!(table.lookup("en", "status.lat"), Some("Latitude"));
        assert_eq!(table.lookup("en", "zoom"), Some("3"));
        assert_eq!(table.lookup("en", "beta"), Some("true"));
        assert_eq!(table.lookup("en", "gone"), None);
        assert!(!table.has_language("de"));
    }

    #[test]
    /// What: Malformed documents are rejected with the right error kind.
    ///
    /// Inputs:
    /// - Truncated JSON, a top-level array, blank input.
    ///
    /// Output:
    /// - `Parse` for the first, `Shape` for the others.
    fn test_parse_translation_json_invalid() {
        assert!(matches!(
            parse_translation_json("{ \"en\": "),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            parse_translation_json("[1, 2]"),
            Err(LoadError::Shape(_))
        ));
        assert!(matches!(
            parse_translation_json("   "),
            Err(LoadError::Shape(_))
        ));
    }

    #[test]
    /// What: A file on disk loads into a table.
    ///
    /// Inputs:
    /// - Temporary JSON file.
    ///
    /// Output:
    /// - Table with both languages.
    fn test_load_translation_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let path = temp_dir.path().join("translations.json");
        fs::write(&path, r#"{"en":{"a":"Hello"},"ja":{"a":"こんにちは"}}"#)
            .expect("Failed to write test translation file");

        let table = load_translation_file(&path).expect("Failed to load test translation file");
        assert_eq!(table.lookup("ja", "a"), Some("こんにちは"));
    }

    #[test]
    /// What: A missing file reports an I/O error.
    fn test_load_translation_file_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let result = load_translation_file(&temp_dir.path().join("missing.json"));
        let err = result.expect_err("missing file must fail");
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[tokio::test]
    /// What: `load_translations` reads a file source asynchronously.
    async fn test_load_translations_from_file_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let path = temp_dir.path().join("t.json");
        fs::write(&path, r#"{"en":{"a":"Hello"}}"#).expect("Failed to write test file");

        let source = TranslationSource::File(path);
        let table = load_translations(&source)
            .await
            .expect("Failed to load from file source");
        assert_eq!(table.lookup("en", "a"), Some("Hello"));
    }

    #[test]
    /// What: HTTP(S) locations become URLs and anything else a path.
    fn test_translation_source_parse() {
        assert_eq!(
            TranslationSource::parse("https://example.org/translations.json"),
            TranslationSource::Url("https://example.org/translations.json".to_string())
        );
        assert_eq!(
            TranslationSource::parse(" HTTP://host/t.json "),
            TranslationSource::Url("HTTP://host/t.json".to_string())
        );
        assert_eq!(
            TranslationSource::parse("config/translations.json"),
            TranslationSource::File(PathBuf::from("config/translations.json"))
        );
    }
}
