//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use luxplan_config::ConfigError;
use luxplan_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const LOAD: i32 = 7;
    pub const EXPORT: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Catalog loading ──────────────────────────────────────────────
    #[error("Failed to load catalog from {source_name}")]
    #[diagnostic(
        code(luxplan::catalog_load),
        help(
            "{reason}\n\
             Check --lamps / --rooms / --base-url, or [catalog] in: luxplan config path"
        )
    )]
    CatalogLoad { source_name: String, reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(luxplan::not_found),
        help("Run: luxplan {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(luxplan::validation))]
    Validation { field: String, reason: String },

    // ── Export ───────────────────────────────────────────────────────
    #[error("Layout export failed: {reason}")]
    #[diagnostic(
        code(luxplan::export),
        help("Check that the target directory exists and is writable.")
    )]
    Export { reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(luxplan::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(luxplan::config))]
    Config { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CatalogLoad { .. } => exit_code::LOAD,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Export { .. } => exit_code::EXPORT,
            Self::ConfigExists { .. } | Self::Config { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CatalogLoad {
                source_name,
                reason,
                status: _,
            } => CliError::CatalogLoad {
                source_name,
                reason,
            },

            CoreError::RoomNotFound { key } => CliError::NotFound {
                resource_type: "room".into(),
                identifier: key,
                list_command: "rooms".into(),
            },

            CoreError::SubRoomNotFound { room, key } => CliError::NotFound {
                resource_type: "sub-room".into(),
                identifier: key,
                list_command: format!("sub-rooms {room}"),
            },

            CoreError::LampNotFound { index, .. } => CliError::NotFound {
                resource_type: "lamp".into(),
                identifier: index.to_string(),
                list_command: "lamps".into(),
            },

            CoreError::InvalidDimensions { .. } => CliError::Validation {
                field: "dimensions".into(),
                reason: err.to_string(),
            },

            CoreError::NoRoomSelected => CliError::Validation {
                field: "room".into(),
                reason: "no room is available for the selected category".into(),
            },

            CoreError::NoLampSelected => CliError::Validation {
                field: "lamp".into(),
                reason: "the lamp catalog is empty".into(),
            },

            CoreError::InvalidLampLumen { .. } => CliError::Validation {
                field: "lamp".into(),
                reason: err.to_string(),
            },

            CoreError::InvalidBallastFactor { value } => CliError::Validation {
                field: "ballast".into(),
                reason: format!("must be greater than 0, got {value}"),
            },

            CoreError::FixtureCountOutOfRange { .. } | CoreError::TooManyFixtures { .. } => {
                CliError::Validation {
                    field: "count".into(),
                    reason: err.to_string(),
                }
            }

            CoreError::Export { reason } => CliError::Export { reason },

            CoreError::ExportInProgress | CoreError::Io { .. } => CliError::Export {
                reason: err.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
