//! `calc`: apply the selection cascade, run the calculator, print the summary.

use tracing::{debug, warn};

use luxplan_core::{
    CalcInput, CalcMode, Catalog, CoreError, Exporter, ModeOptions, Selection, Summary, layout,
};

use crate::cli::{CalcArgs, ModeArg};
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, detail_line};

pub fn handle(catalog: &Catalog, args: &CalcArgs, settings: &Settings) -> Result<(), CliError> {
    let selection = select(catalog, args)?;
    debug!(?selection, "selection resolved");

    let input = build_input(args, settings);
    let calc = selection.calculate(catalog, &input)?;

    let room = selection.room(catalog).ok_or(CoreError::NoRoomSelected)?;
    let lamp = selection.lamp(catalog).ok_or(CoreError::NoLampSelected)?;
    let summary = Summary::new(&calc, room, selection.sub_room(catalog), lamp);

    let color = settings.color;
    let out = output::render_single(
        settings.output,
        &summary,
        |s| render_detail(s, color),
        |s| s.fixture_count.to_string(),
    );
    output::print_output(&out, settings.quiet);

    if let Some(target) = &args.export {
        let path = target.as_ref().unwrap_or(&settings.export_file);
        let plan = layout(args.length, args.width, calc.fixture_count)?;
        let written = Exporter::new().export_png(&plan, path)?;
        if !settings.quiet {
            eprintln!("Layout exported to {}", written.display());
        }
    }
    Ok(())
}

/// Apply the picker flags in cascade order: category, room, sub-room, lamp.
fn select(catalog: &Catalog, args: &CalcArgs) -> Result<Selection, CoreError> {
    let mut selection = Selection::new(catalog);
    if let Some(category) = &args.category {
        selection.set_category(catalog, category);
    }
    if let Some(room) = &args.room {
        selection.set_room(catalog, room)?;
    }
    if let Some(sub_room) = &args.sub_room {
        selection.set_sub_room(catalog, sub_room)?;
    }
    if let Some(index) = args.lamp {
        selection.set_lamp(catalog, index)?;
    }
    Ok(selection)
}

fn build_input(args: &CalcArgs, settings: &Settings) -> CalcInput {
    let ballast = args.ballast.unwrap_or(settings.ballast_factor);
    let input = match args.mode {
        ModeArg::Direct => {
            if args.manual || args.aux_count.is_some() || args.aux_watt.is_some() {
                warn!("mixed-mode options are ignored in direct mode");
            }
            CalcInput::direct(args.length, args.width)
        }
        ModeArg::Mixed => CalcInput::mixed(
            args.length,
            args.width,
            ModeOptions {
                auto_calculate: !args.manual,
                manual_count: args.manual_count,
                aux_outlet_count: args.aux_count,
                aux_outlet_watt: args.aux_watt,
            },
        ),
    };
    input.with_ballast_factor(ballast)
}

fn render_detail(s: &Summary, color: bool) -> String {
    let mut lines = vec![
        detail_line("Room", &s.room, color),
        detail_line("Required", format!("{} lx", s.required_lux), color),
        detail_line("Area", format!("{:.2} m²", s.area_m2), color),
        detail_line("Lamp", &s.lamp, color),
        detail_line("Ballast factor", s.ballast_factor, color),
        detail_line("Mode", s.mode, color),
        detail_line("Fixtures", s.fixture_count, color),
    ];
    if s.mode == CalcMode::Mixed {
        lines.push(detail_line("Aux outlets", format!("{} W", s.aux_wattage), color));
    }
    lines.push(detail_line("Total wattage", format!("{} W", s.total_wattage), color));
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use serde_json::json;

    use super::*;
    use crate::cli::{Cli, Command};

    fn catalog() -> Catalog {
        Catalog::from_raw(
            &json!([
                { "name": "LED 10W", "watt": 10, "lumen": 1000 },
                { "name": "TL 18W", "watt": 18, "lumen": 2500 }
            ]),
            &json!([
                { "key": "dapur", "kategori": "Rumah", "ruangan": "Dapur", "lux": 250 },
                {
                    "key": "kelas", "kategori": "Sekolah", "ruangan": "Kelas", "lux": 300,
                    "subs": [{ "key": "papan", "nama": "Papan Tulis", "lux": 500 }]
                }
            ]),
        )
    }

    fn calc_args(args: &[&str]) -> CalcArgs {
        let mut argv = vec!["luxplan", "calc"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Calc(a) => a,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn selection_defaults_to_first_room_and_lamp() {
        let cat = catalog();
        let sel = select(&cat, &calc_args(&["5", "4"])).unwrap();
        assert_eq!(sel.room_key(), Some("dapur"));
        assert_eq!(sel.lamp_index(), Some(0));
    }

    #[test]
    fn category_flag_cascades_to_sub_room() {
        let cat = catalog();
        let sel = select(&cat, &calc_args(&["5", "4", "--category", "Sekolah"])).unwrap();
        assert_eq!(sel.room_key(), Some("kelas"));
        assert_eq!(sel.sub_room_key(), Some("papan"));
    }

    #[test]
    fn unknown_sub_room_is_rejected() {
        let cat = catalog();
        let err = select(&cat, &calc_args(&["5", "4", "--sub-room", "x"])).unwrap_err();
        assert!(matches!(err, CoreError::SubRoomNotFound { .. }));
    }

    fn settings() -> Settings {
        Settings {
            catalog: luxplan_core::CatalogConfig::default(),
            output: crate::cli::OutputFormat::Table,
            color: false,
            quiet: true,
            ballast_factor: 0.8,
            export_file: "denah_lampu.png".into(),
        }
    }

    #[test]
    fn mixed_manual_input() {
        let args = calc_args(&[
            "5", "4", "--mode", "mixed", "--manual", "--manual-count", "5", "--aux-count", "2",
            "--aux-watt", "100", "--lamp", "1",
        ]);
        let cat = catalog();
        let sel = select(&cat, &args).unwrap();
        let input = build_input(&args, &settings());
        assert_eq!(input.mode, CalcMode::Mixed);
        assert!(!input.options.auto_calculate);

        let calc = sel.calculate(&cat, &input).unwrap();
        assert_eq!(calc.fixture_count, 5);
        assert!((calc.total_wattage - 290.0).abs() < 1e-9);
    }

    #[test]
    fn ballast_flag_overrides_configured_default() {
        let input = build_input(&calc_args(&["5", "4", "--ballast", "0.5"]), &settings());
        assert!(matches!(input.ballast_factor, Some(b) if (b - 0.5).abs() < f64::EPSILON));

        let input = build_input(&calc_args(&["5", "4"]), &settings());
        assert!(matches!(input.ballast_factor, Some(b) if (b - 0.8).abs() < f64::EPSILON));
    }

    #[test]
    fn detail_view_lists_totals() {
        let cat = catalog();
        let sel = select(&cat, &calc_args(&["5", "4", "--lamp", "1"])).unwrap();
        let calc = sel
            .calculate(&cat, &CalcInput::direct(5.0, 4.0))
            .unwrap();
        let summary = Summary::new(
            &calc,
            sel.room(&cat).unwrap(),
            None,
            sel.lamp(&cat).unwrap(),
        );
        let text = render_detail(&summary, false);
        assert!(text.contains("Dapur"));
        assert!(text.contains("TL 18W (18 W, 2500 lm)"));
        assert!(text.lines().any(|l| l.starts_with("Fixtures") && l.ends_with(" 3")));
        assert!(text.lines().any(|l| l.starts_with("Total wattage") && l.ends_with("54 W")));
    }
}
