//! Shared configuration for luxplan.
//!
//! TOML config file + `LUXPLAN_*` environment overrides, and translation
//! to `luxplan_core::CatalogConfig`. The CLI layers its flag overrides on
//! top of what this crate resolves.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use luxplan_api::CatalogSource;
use luxplan_core::CatalogConfig;
use luxplan_core::calc::DEFAULT_BALLAST_FACTOR;
use luxplan_core::config::{DEFAULT_LAMPS_FILE, DEFAULT_ROOMS_FILE};
use luxplan_core::export::DEFAULT_EXPORT_FILE;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Where the lamp and room catalogs live.
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Base URL that relative catalog entries are joined onto.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_lamps")]
    pub lamps: String,

    #[serde(default = "default_rooms")]
    pub rooms: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            lamps: default_lamps(),
            rooms: default_rooms(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_ballast")]
    pub ballast_factor: f64,

    #[serde(default = "default_export_file")]
    pub export_file: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            ballast_factor: default_ballast(),
            export_file: default_export_file(),
        }
    }
}

fn default_lamps() -> String {
    DEFAULT_LAMPS_FILE.into()
}
fn default_rooms() -> String {
    DEFAULT_ROOMS_FILE.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_ballast() -> f64 {
    DEFAULT_BALLAST_FACTOR
}
fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "luxplan", "luxplan").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("luxplan");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is not
/// an error; its layer is simply empty.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LUXPLAN_").split("__"))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core ─────────────────────────────────────────────

/// Parse the optional base URL.
pub fn base_url(settings: &CatalogSettings) -> Result<Option<url::Url>, ConfigError> {
    settings
        .base_url
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|raw| {
            let mut url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
                field: "catalog.base_url".into(),
                reason: format!("invalid URL: {raw}"),
            })?;
            // Url::join replaces the last segment unless the path ends in '/'
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(url)
        })
        .transpose()
}

fn resolve_source(
    field: &str,
    entry: &str,
    base: Option<&url::Url>,
) -> Result<CatalogSource, ConfigError> {
    if entry.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    CatalogSource::resolve(entry, base).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: e.to_string(),
    })
}

/// Build a `CatalogConfig` from catalog settings.
pub fn to_catalog_config(settings: &CatalogSettings) -> Result<CatalogConfig, ConfigError> {
    let base = base_url(settings)?;
    Ok(CatalogConfig {
        lamps: resolve_source("catalog.lamps", &settings.lamps, base.as_ref())?,
        rooms: resolve_source("catalog.rooms", &settings.rooms, base.as_ref())?,
        timeout: Duration::from_secs(settings.timeout),
    })
}

/// Validate the ballast default before it reaches the calculator.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let bf = cfg.defaults.ballast_factor;
    if !bf.is_finite() || bf <= 0.0 {
        return Err(ConfigError::Validation {
            field: "defaults.ballast_factor".into(),
            reason: format!("expected a positive number, got {bf}"),
        });
    }
    Ok(())
}
