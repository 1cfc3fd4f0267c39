// ── Core error types ──
//
// User-facing errors from luxplan-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<luxplan_api::Error>` impl
// folds every transport failure into one catalog-load notice.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Load errors ──────────────────────────────────────────────────
    #[error("Failed to load catalog from {source_name}: {reason}")]
    CatalogLoad {
        source_name: String,
        reason: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Selection errors ─────────────────────────────────────────────
    #[error("Room not found: {key}")]
    RoomNotFound { key: String },

    #[error("Sub-room '{key}' not found in room '{room}'")]
    SubRoomNotFound { room: String, key: String },

    #[error("Lamp not found at index {index} ({available} available)")]
    LampNotFound { index: usize, available: usize },

    // ── Validation errors ────────────────────────────────────────────
    #[error("Invalid dimensions: length and width must be positive finite numbers (got {length} x {width})")]
    InvalidDimensions { length: f64, width: f64 },

    #[error("No room selected")]
    NoRoomSelected,

    #[error("No lamp selected")]
    NoLampSelected,

    #[error("Invalid lamp lumen: '{lamp}' has {lumen} lm")]
    InvalidLampLumen { lamp: String, lumen: f64 },

    #[error("Invalid ballast factor: {value} (must be greater than 0)")]
    InvalidBallastFactor { value: f64 },

    #[error("Fixture count out of range: {value}")]
    FixtureCountOutOfRange { value: f64 },

    #[error("Too many fixtures to lay out: {count} (at most {max})")]
    TooManyFixtures { count: u64, max: u64 },

    // ── Export errors ────────────────────────────────────────────────
    #[error("Export failed: {reason}")]
    Export { reason: String },

    #[error("An export is already in progress")]
    ExportInProgress,

    #[error("Cannot write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<luxplan_api::Error> for CoreError {
    fn from(err: luxplan_api::Error) -> Self {
        let status = err.status();
        let (source_name, reason) = match err {
            luxplan_api::Error::Status { url, status, body } => {
                (url, format!("HTTP {status}: {body}"))
            }
            luxplan_api::Error::Io { path, source } => {
                (path.display().to_string(), source.to_string())
            }
            luxplan_api::Error::Deserialization {
                source_name,
                message,
            } => (source_name, format!("invalid JSON: {message}")),
            luxplan_api::Error::Transport(ref e) => (
                e.url().map_or_else(|| "<unknown>".into(), ToString::to_string),
                if e.is_timeout() {
                    "request timed out".into()
                } else {
                    err.to_string()
                },
            ),
            other => ("<catalog>".into(), other.to_string()),
        };
        CoreError::CatalogLoad {
            source_name,
            reason,
            status,
        }
    }
}
