use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `luxplan-api` crate.
///
/// Covers every way fetching a raw catalog document can fail.
/// `luxplan-core` folds these into a single load-failure notice.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success HTTP status from the content host.
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        /// First 200 characters of the response body.
        body: String,
    },

    /// A URL that cannot be turned into something fetchable
    /// (e.g. a `file://` URL with a remote host).
    #[error("Unsupported catalog source: {0}")]
    UnsupportedSource(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    // ── Local files ─────────────────────────────────────────────────
    /// Reading a local catalog file failed.
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// The document was fetched but is not valid JSON.
    #[error("Invalid JSON in {source_name}: {message}")]
    Deserialization {
        source_name: String,
        message: String,
    },
}

impl Error {
    /// HTTP status code, if this error came from a status response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
