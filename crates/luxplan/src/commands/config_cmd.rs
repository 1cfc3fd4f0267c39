//! Config subcommand handlers.

use luxplan_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show: effective config (file + env) ─────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = global.output.unwrap_or(OutputFormat::Table);
            let out = output::render_single(
                format,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("# {e}")),
                |_| config::config_path().display().to_string(),
            );
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Init: write defaults ────────────────────────────────────
        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let path = config::save_config(&Config::default())?;
            if !global.quiet {
                eprintln!("Configuration written to {}", path.display());
            }
            Ok(())
        }
    }
}
