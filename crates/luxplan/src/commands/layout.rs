//! `layout`: grid positions, the SVG scene, and PNG export.

use serde::Serialize;
use tabled::Tabled;

use luxplan_core::{Exporter, Point, layout, render_svg};

use crate::cli::LayoutArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

/// One fixture position, numbered in placement order.
#[derive(Serialize)]
struct Placement {
    index: usize,
    row: u64,
    column: u64,
    x: f64,
    y: f64,
}

#[derive(Tabled)]
struct PlacementRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Row")]
    row: u64,
    #[tabled(rename = "Col")]
    column: u64,
    #[tabled(rename = "X")]
    x: String,
    #[tabled(rename = "Y")]
    y: String,
}

impl From<&Placement> for PlacementRow {
    fn from(p: &Placement) -> Self {
        Self {
            index: p.index,
            row: p.row,
            column: p.column,
            x: format!("{:.1}", p.x),
            y: format!("{:.1}", p.y),
        }
    }
}

pub fn handle(args: &LayoutArgs, settings: &Settings) -> Result<(), CliError> {
    let plan = layout(args.length, args.width, args.count)?;

    if args.svg {
        output::print_output(render_svg(&plan).trim_end(), settings.quiet);
    } else {
        let placements = placements(&plan.positions, plan.columns);
        let out = output::render_list(
            settings.output,
            &placements,
            |p| PlacementRow::from(p),
            |p| format!("{:.2} {:.2}", p.x, p.y),
        );
        output::print_output(&out, settings.quiet);
    }

    if let Some(target) = &args.export {
        let path = target.as_ref().unwrap_or(&settings.export_file);
        let written = Exporter::new().export_png(&plan, path)?;
        if !settings.quiet {
            eprintln!("Layout exported to {}", written.display());
        }
    }
    Ok(())
}

/// Number positions and recover their 1-based grid cell (row-major).
fn placements(positions: &[Point], columns: u64) -> Vec<Placement> {
    positions
        .iter()
        .zip(0u64..)
        .enumerate()
        .map(|(index, (p, ordinal))| Placement {
            index: index + 1,
            row: ordinal / columns + 1,
            column: ordinal % columns + 1,
            x: p.x,
            y: p.y,
        })
        .collect()
}
