// Where a raw catalog document lives.
//
// The content host is either an HTTP(S) server or the local filesystem.
// `file://` URLs are normalized to plain paths so there is exactly one
// representation per location.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::error::Error;

/// Location of a lamp or room catalog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched with an HTTP GET.
    Url(Url),
    /// Read from disk.
    File(PathBuf),
}

impl CatalogSource {
    /// Resolve a configured entry, optionally relative to a base URL.
    ///
    /// Absolute `http`, `https` and `file` URLs are taken as-is. Any other
    /// entry is joined onto `base` when one is given, and treated as a
    /// filesystem path otherwise.
    pub fn resolve(entry: &str, base: Option<&Url>) -> Result<Self, Error> {
        let entry = entry.trim();
        if let Some(url) = parse_absolute(entry) {
            return Self::from_url(url);
        }
        match base {
            Some(base) => Self::from_url(base.join(entry)?),
            None => Ok(Self::File(PathBuf::from(entry))),
        }
    }

    fn from_url(url: Url) -> Result<Self, Error> {
        if url.scheme() == "file" {
            return url
                .to_file_path()
                .map(Self::File)
                .map_err(|()| Error::UnsupportedSource(url.to_string()));
        }
        Ok(Self::Url(url))
    }

    /// Short label for log lines and error messages.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

/// Only schemes we actually know how to fetch count as absolute URLs, so
/// Windows drive letters (`C:\...`) fall through to paths.
fn parse_absolute(entry: &str) -> Option<Url> {
    let url = Url::parse(entry).ok()?;
    matches!(url.scheme(), "http" | "https" | "file").then_some(url)
}

impl FromStr for CatalogSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s, None)
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
