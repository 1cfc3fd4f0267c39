// ── Runtime catalog configuration ──
//
// Describes *where* the catalogs live and how long to wait for them.
// The CLI builds a `CatalogConfig` and hands it in; core never reads
// config files.

use std::path::PathBuf;
use std::time::Duration;

use luxplan_api::CatalogSource;

/// Default lamp catalog document name.
pub const DEFAULT_LAMPS_FILE: &str = "lampu.json";

/// Default room catalog document name.
pub const DEFAULT_ROOMS_FILE: &str = "ruangan.json";

/// Where to load the two catalogs from.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub lamps: CatalogSource,
    pub rooms: CatalogSource,
    /// Per-request timeout for URL sources.
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            lamps: CatalogSource::File(PathBuf::from(DEFAULT_LAMPS_FILE)),
            rooms: CatalogSource::File(PathBuf::from(DEFAULT_ROOMS_FILE)),
            timeout: Duration::from_secs(30),
        }
    }
}
