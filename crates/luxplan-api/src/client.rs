// Catalog HTTP/file client
//
// Wraps `reqwest::Client` for URL sources and `tokio::fs` for file sources.
// Both paths end in the same place: a parsed `serde_json::Value` whose shape
// is deliberately unchecked. Normalization is the core crate's job.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::source::CatalogSource;
use crate::transport::TransportConfig;

/// Fetches raw catalog documents.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
}

impl CatalogClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch and parse one document.
    pub async fn fetch_json(&self, source: &CatalogSource) -> Result<Value, Error> {
        let body = match source {
            CatalogSource::Url(url) => self.get(url).await?,
            CatalogSource::File(path) => read_file(path).await?,
        };
        trace!(source = %source, bytes = body.len(), "catalog body received");

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            source_name: source.name(),
            message: e.to_string(),
        })
    }

    /// Fetch the lamp and room documents concurrently.
    ///
    /// Both must succeed; the first failure is returned and the other
    /// request is dropped.
    pub async fn fetch_pair(
        &self,
        lamps: &CatalogSource,
        rooms: &CatalogSource,
    ) -> Result<(Value, Value), Error> {
        tokio::try_join!(self.fetch_json(lamps), self.fetch_json(rooms))
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get(&self, url: &Url) -> Result<String, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        Ok(resp.text().await?)
    }
}

async fn read_file(path: &Path) -> Result<String, Error> {
    debug!("READ {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
