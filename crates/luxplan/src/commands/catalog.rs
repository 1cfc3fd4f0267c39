//! Catalog listings: categories, rooms, sub-rooms, lamps.

use serde::Serialize;
use tabled::Tabled;

use luxplan_core::{Catalog, CoreError, Lamp, Room, SubRoom};

use crate::cli::{RoomsArgs, SubRoomsArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Rooms")]
    rooms: usize,
}

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Lux")]
    lux: f64,
    #[tabled(rename = "Hint")]
    hint: u32,
    #[tabled(rename = "Sub-rooms")]
    sub_rooms: usize,
}

impl From<&Room> for RoomRow {
    fn from(r: &Room) -> Self {
        Self {
            key: r.key.clone(),
            name: r.name.clone(),
            category: r.category.clone(),
            lux: r.required_lux,
            hint: r.fixture_count_hint,
            sub_rooms: r.sub_rooms.len(),
        }
    }
}

#[derive(Tabled)]
struct SubRoomRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Lux")]
    lux: f64,
    #[tabled(rename = "Hint")]
    hint: u32,
}

impl From<&SubRoom> for SubRoomRow {
    fn from(s: &SubRoom) -> Self {
        Self {
            key: s.key.clone(),
            name: s.name.clone(),
            lux: s.required_lux,
            hint: s.fixture_count_hint,
        }
    }
}

/// A lamp together with the index used to select it.
#[derive(Serialize)]
struct IndexedLamp<'a> {
    index: usize,
    #[serde(flatten)]
    lamp: &'a Lamp,
}

#[derive(Tabled)]
struct LampRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Watt")]
    watt: f64,
    #[tabled(rename = "Lumen")]
    lumen: f64,
}

impl From<&IndexedLamp<'_>> for LampRow {
    fn from(l: &IndexedLamp<'_>) -> Self {
        Self {
            index: l.index,
            name: l.lamp.name.clone(),
            watt: l.lamp.watt,
            lumen: l.lamp.lumen,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────

pub fn categories(catalog: &Catalog, settings: &Settings) {
    let names = catalog.categories();
    let out = output::render_list(
        settings.output,
        &names,
        |name| CategoryRow {
            name: (*name).to_owned(),
            rooms: catalog.rooms_in(name).count(),
        },
        |name| (*name).to_owned(),
    );
    output::print_output(&out, settings.quiet);
}

pub fn rooms(catalog: &Catalog, args: &RoomsArgs, settings: &Settings) {
    let rooms: Vec<&Room> = match args.category.as_deref() {
        Some(category) => catalog.rooms_in(category).collect(),
        None => catalog.rooms.iter().collect(),
    };
    let out = output::render_list(
        settings.output,
        &rooms,
        |r| RoomRow::from(*r),
        |r| r.key.clone(),
    );
    output::print_output(&out, settings.quiet);
}

pub fn sub_rooms(
    catalog: &Catalog,
    args: &SubRoomsArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let room = catalog
        .room(&args.room)
        .ok_or_else(|| CoreError::RoomNotFound {
            key: args.room.clone(),
        })?;
    let out = output::render_list(
        settings.output,
        &room.sub_rooms,
        |s| SubRoomRow::from(s),
        |s| s.key.clone(),
    );
    output::print_output(&out, settings.quiet);
    Ok(())
}

pub fn lamps(catalog: &Catalog, settings: &Settings) {
    let lamps: Vec<IndexedLamp<'_>> = catalog
        .lamps
        .iter()
        .enumerate()
        .map(|(index, lamp)| IndexedLamp { index, lamp })
        .collect();
    let out = output::render_list(
        settings.output,
        &lamps,
        |l| LampRow::from(l),
        |l| format!("{}\t{}", l.index, l.lamp.name),
    );
    output::print_output(&out, settings.quiet);
}
