//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod calc;
pub mod catalog;
pub mod config_cmd;
pub mod layout;

use luxplan_core::load_catalog;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a command that works on settings (and usually the catalog).
pub async fn dispatch(cmd: Command, settings: &Settings) -> Result<(), CliError> {
    // Layout needs no catalog.
    if let Command::Layout(args) = cmd {
        return layout::handle(&args, settings);
    }

    let catalog = load_catalog(&settings.catalog).await?;

    match cmd {
        Command::Categories => catalog::categories(&catalog, settings),
        Command::Rooms(args) => catalog::rooms(&catalog, &args, settings),
        Command::SubRooms(args) => catalog::sub_rooms(&catalog, &args, settings)?,
        Command::Lamps => catalog::lamps(&catalog, settings),
        Command::Calc(args) => calc::handle(&catalog, &args, settings)?,
        // Layout, Config and Completions are handled before this point
        Command::Layout(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
    Ok(())
}
