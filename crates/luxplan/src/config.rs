//! Effective settings: config file + env (via `luxplan-config`) with
//! CLI flag overrides layered on top.
//!
//! Core never sees these types -- it receives a pre-built `CatalogConfig`.

use std::path::PathBuf;

use clap::ValueEnum;

use luxplan_config::{CatalogSettings, Config};
use luxplan_core::CatalogConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use luxplan_config::{config_path, load_config, save_config};

/// Everything a command needs once flags and config are merged.
#[derive(Debug)]
pub struct Settings {
    pub catalog: CatalogConfig,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub ballast_factor: f64,
    pub export_file: PathBuf,
}

/// Merge the loaded config with global flags.
pub fn resolve(cfg: &Config, global: &GlobalOpts) -> Result<Settings, CliError> {
    luxplan_config::validate(cfg)?;

    let catalog = catalog_settings(&cfg.catalog, global);
    let output = match global.output {
        Some(fmt) => fmt,
        None => parse_enum::<OutputFormat>("defaults.output", &cfg.defaults.output)?,
    };
    let color = match global.color {
        Some(mode) => mode,
        None => parse_enum::<ColorMode>("defaults.color", &cfg.defaults.color)?,
    };

    Ok(Settings {
        catalog: luxplan_config::to_catalog_config(&catalog)?,
        output,
        color: crate::output::should_color(color),
        quiet: global.quiet,
        ballast_factor: cfg.defaults.ballast_factor,
        export_file: PathBuf::from(&cfg.defaults.export_file),
    })
}

/// Catalog settings with `--lamps`, `--rooms`, `--base-url` and
/// `--timeout` applied.
fn catalog_settings(base: &CatalogSettings, global: &GlobalOpts) -> CatalogSettings {
    CatalogSettings {
        base_url: global.base_url.clone().or_else(|| base.base_url.clone()),
        lamps: global.lamps.clone().unwrap_or_else(|| base.lamps.clone()),
        rooms: global.rooms.clone().unwrap_or_else(|| base.rooms.clone()),
        timeout: global.timeout.unwrap_or(base.timeout),
    }
}

fn parse_enum<E: ValueEnum>(field: &str, raw: &str) -> Result<E, CliError> {
    E::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["luxplan"];
        argv.extend_from_slice(args);
        argv.push("lamps");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = Config::default();
        cfg.catalog.lamps = "from-config.json".into();
        cfg.defaults.output = "yaml".into();

        let s = resolve(&cfg, &global(&["--lamps", "flag.json", "--timeout", "5"])).unwrap();
        assert_eq!(s.catalog.lamps.to_string(), "flag.json");
        assert_eq!(s.catalog.rooms.to_string(), "ruangan.json");
        assert_eq!(s.catalog.timeout.as_secs(), 5);
        assert_eq!(s.output, OutputFormat::Yaml);
    }

    #[test]
    fn output_flag_beats_config_default() {
        let cfg = Config::default();
        let s = resolve(&cfg, &global(&["-o", "json", "--color", "never"])).unwrap();
        assert_eq!(s.output, OutputFormat::Json);
        assert!(!s.color);
    }

    #[test]
    fn unknown_output_in_config_is_rejected() {
        let mut cfg = Config::default();
        cfg.defaults.output = "xml".into();
        let err = resolve(&cfg, &global(&[])).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "defaults.output"));
    }

    #[test]
    fn base_url_flag_makes_entries_urls() {
        let s = resolve(
            &Config::default(),
            &global(&["--base-url", "http://localhost:8000/data/"]),
        )
        .unwrap();
        assert_eq!(
            s.catalog.rooms.to_string(),
            "http://localhost:8000/data/ruangan.json"
        );
    }
}
