//! Clap derive structures for the `luxplan` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// luxplan -- lighting calculator for rooms
#[derive(Debug, Parser)]
#[command(
    name = "luxplan",
    version,
    about = "Estimate light fixture counts, wattage and layouts from the command line",
    long_about = "Pick a room from the room catalog and a lamp from the lamp catalog,\n\
        enter the floor dimensions, and get the number of fixtures needed to\n\
        reach the room's required illuminance (lumen method), the total\n\
        wattage, and a grid layout that can be exported as PNG.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Lamp catalog: file path or URL (overrides config)
    #[arg(long, env = "LUXPLAN_LAMPS", global = true, hide_env = true)]
    pub lamps: Option<String>,

    /// Room catalog: file path or URL (overrides config)
    #[arg(long, env = "LUXPLAN_ROOMS", global = true, hide_env = true)]
    pub rooms: Option<String>,

    /// Base URL that relative catalog entries are resolved against
    #[arg(long, env = "LUXPLAN_BASE_URL", global = true, hide_env = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "LUXPLAN_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds for URL catalogs
    #[arg(long, env = "LUXPLAN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Fixture count from the lumen formula, wattage from lamps only
    Direct,
    /// Manual or computed fixture count plus auxiliary outlets
    Mixed,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List room categories
    #[command(alias = "cat")]
    Categories,

    /// List rooms, optionally for one category
    #[command(alias = "r")]
    Rooms(RoomsArgs),

    /// List the sub-rooms of a room
    SubRooms(SubRoomsArgs),

    /// List lamps with their catalog index
    #[command(alias = "l")]
    Lamps,

    /// Compute fixture count and total wattage for a room
    #[command(alias = "c")]
    Calc(CalcArgs),

    /// Lay out a number of fixtures on a grid
    Layout(LayoutArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Catalog listings ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoomsArgs {
    /// Only rooms in this category
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct SubRoomsArgs {
    /// Room key (see `luxplan rooms`)
    pub room: String,
}

// ── Calculation ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Room length in meters
    pub length: f64,

    /// Room width in meters
    pub width: f64,

    /// Room category (defaults to the first one in the catalog)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Room key (defaults to the first room of the category)
    #[arg(long, short = 'r')]
    pub room: Option<String>,

    /// Sub-room key (defaults to the room's first sub-room)
    #[arg(long, short = 's')]
    pub sub_room: Option<String>,

    /// Lamp index (see `luxplan lamps`)
    #[arg(long, short = 'l')]
    pub lamp: Option<usize>,

    /// Ballast factor (defaults to the configured value)
    #[arg(long, short = 'b', allow_negative_numbers = true)]
    pub ballast: Option<f64>,

    /// Calculation mode
    #[arg(long, short = 'm', value_enum, default_value = "direct")]
    pub mode: ModeArg,

    /// Mixed mode: take the fixture count from --manual-count instead of
    /// computing it
    #[arg(long)]
    pub manual: bool,

    /// Mixed mode: hand-entered fixture count
    #[arg(long, requires = "manual", allow_negative_numbers = true)]
    pub manual_count: Option<f64>,

    /// Mixed mode: number of auxiliary power outlets
    #[arg(long, allow_negative_numbers = true)]
    pub aux_count: Option<f64>,

    /// Mixed mode: wattage per auxiliary outlet
    #[arg(long, allow_negative_numbers = true)]
    pub aux_watt: Option<f64>,

    /// Also export the fixture layout as PNG (default file name from config)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
}

// ── Layout ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Room length in meters
    pub length: f64,

    /// Room width in meters
    pub width: f64,

    /// Number of fixtures
    pub count: u64,

    /// Print the SVG scene instead of fixture positions
    #[arg(long)]
    pub svg: bool,

    /// Export the layout as PNG (default file name from config)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
