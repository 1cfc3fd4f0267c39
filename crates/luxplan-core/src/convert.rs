// ── Raw-to-domain catalog normalization ──
//
// Bridges loosely typed catalog JSON into the canonical `model` types. The
// source documents come from hand-maintained files: field names vary
// (Indonesian and English spellings), numbers arrive as strings, and lux
// levels are sometimes written as ranges. Every accepted spelling of a field
// lives in one ordered precedence table below; the first listed name that is
// present wins.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::model::{Lamp, Room, SubRoom};

/// Category assigned to rooms whose record names none.
pub const FALLBACK_CATEGORY: &str = "Umum";

// ── Field precedence tables ─────────────────────────────────────────

/// Accepted field names, in precedence order.
pub mod fields {
    pub const LAMP_NAME: &[&str] = &["name"];
    pub const LAMP_BRAND: &[&str] = &["brand"];
    pub const LAMP_MODEL: &[&str] = &["model"];
    pub const LAMP_WATT: &[&str] = &["watt"];
    pub const LAMP_LUMEN: &[&str] = &["lumen"];

    pub const ROOM_KEY: &[&str] = &["key"];
    pub const ROOM_CATEGORY: &[&str] = &["kategori", "category"];
    pub const ROOM_NAME: &[&str] = &["ruangan", "name"];
    pub const ROOM_LUX: &[&str] = &["tingkat_pencahayaan_lux", "lux"];
    pub const ROOM_HINT: &[&str] = &["lampu", "lamps"];
    /// The first of these that is present is used, even when it is empty.
    pub const ROOM_SUB_ROOMS: &[&str] = &["subs", "sub", "sub_rooms"];

    pub const SUB_KEY: &[&str] = &["key"];
    pub const SUB_NAME: &[&str] = &["nama", "name"];
    pub const SUB_LUX: &[&str] = &["tingkat_pencahayaan_lux", "lux", "tingkat"];
    pub const SUB_HINT: &[&str] = &["lampu", "lamps"];
}

// ── Lookup helpers ──────────────────────────────────────────────────

/// First field from `names` that is present and not `null`.
pub fn lookup<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| record.get(*name).filter(|v| !v.is_null()))
}

/// First field from `names` holding non-blank text. Numbers count as text
/// so numeric keys still work.
pub fn lookup_text(record: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match record.get(*name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// ── Scalar coercion ─────────────────────────────────────────────────

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid"));

/// Coerce a loosely typed value to a non-negative number.
///
/// Numeric strings are parsed whole (`"18"` → 18, `"18W"` → 0). Anything
/// missing, non-numeric, negative or non-finite becomes 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    non_negative(n)
}

/// Parse an illuminance level.
///
/// Numbers are used directly. Strings yield their first numeric token, so
/// `"120-150"` → 120 and `"  99.5lux"` → 99.5. No token, or no value, → 0.
pub fn parse_lux(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => non_negative(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => first_number(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coerce a fixture-count hint to a whole number, truncating fractions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
pub fn coerce_count(value: Option<&Value>) -> u32 {
    let n = match value {
        Some(Value::String(s)) => first_number(s).unwrap_or(0.0),
        other => coerce_number(other),
    };
    // Float-to-int `as` saturates; n is already finite and non-negative.
    n.trunc() as u32
}

fn first_number(s: &str) -> Option<f64> {
    NUMBER_TOKEN
        .find(s)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

fn non_negative(n: f64) -> f64 {
    if n.is_finite() && n > 0.0 { n } else { 0.0 }
}

/// Derive a lookup key from a display name.
///
/// Lowercases and keeps only `[a-z0-9]` characters, so `"Ruang Tamu!!"`
/// → `"ruangtamu"`. Idempotent; `""` stays `""`.
pub fn to_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

// ── Lamps ───────────────────────────────────────────────────────────

/// Normalize a raw lamp document. Anything but an array yields no lamps.
pub fn normalize_lamps(raw: &Value) -> Vec<Lamp> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_lamp(i + 1, &as_record(item)))
        .collect()
}

/// Normalize one lamp record. `ordinal` is 1-based.
pub fn normalize_lamp(ordinal: usize, record: &Map<String, Value>) -> Lamp {
    let name = lookup_text(record, fields::LAMP_NAME)
        .or_else(|| {
            let brand = lookup_text(record, fields::LAMP_BRAND).unwrap_or_default();
            let model = lookup_text(record, fields::LAMP_MODEL).unwrap_or_default();
            let joined = format!("{brand} {model}");
            let joined = joined.trim();
            (!joined.is_empty()).then(|| joined.to_owned())
        })
        .unwrap_or_else(|| format!("Lamp {ordinal}"));

    let consumed = [fields::LAMP_NAME, fields::LAMP_WATT, fields::LAMP_LUMEN].concat();
    let extra = record
        .iter()
        .filter(|(k, _)| !consumed.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Lamp {
        name,
        watt: coerce_number(lookup(record, fields::LAMP_WATT)),
        lumen: coerce_number(lookup(record, fields::LAMP_LUMEN)),
        extra,
    }
}

// ── Rooms ───────────────────────────────────────────────────────────

/// Normalize a raw room document. Anything but an array yields no rooms.
pub fn normalize_rooms(raw: &Value) -> Vec<Room> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_room(i + 1, &as_record(item)))
        .collect()
}

/// Normalize one room record. `ordinal` is 1-based.
pub fn normalize_room(ordinal: usize, record: &Map<String, Value>) -> Room {
    let raw_name = lookup_text(record, fields::ROOM_NAME).unwrap_or_default();
    let key = derive_key(record, fields::ROOM_KEY, &raw_name)
        .unwrap_or_else(|| format!("room_{ordinal}"));
    let name = if raw_name.is_empty() {
        key.clone()
    } else {
        raw_name
    };

    let sub_rooms = match lookup(record, fields::ROOM_SUB_ROOMS) {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| normalize_sub_room(&name, i + 1, &as_record(item)))
            .collect(),
        _ => Vec::new(),
    };

    Room {
        key,
        category: lookup_text(record, fields::ROOM_CATEGORY)
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_owned()),
        required_lux: parse_lux(lookup(record, fields::ROOM_LUX)),
        fixture_count_hint: coerce_count(lookup(record, fields::ROOM_HINT)),
        name,
        sub_rooms,
    }
}

/// Normalize one sub-room record belonging to `parent_name`.
pub fn normalize_sub_room(
    parent_name: &str,
    ordinal: usize,
    record: &Map<String, Value>,
) -> SubRoom {
    let raw_name = lookup_text(record, fields::SUB_NAME).unwrap_or_default();
    let key = derive_key(record, fields::SUB_KEY, &raw_name)
        .unwrap_or_else(|| format!("{parent_name}_sub_{ordinal}"));

    SubRoom {
        name: if raw_name.is_empty() {
            key.clone()
        } else {
            raw_name
        },
        required_lux: parse_lux(lookup(record, fields::SUB_LUX)),
        fixture_count_hint: coerce_count(lookup(record, fields::SUB_HINT)),
        key,
    }
}

/// Explicit key, else a slug of the name. `None` when both are empty.
fn derive_key(record: &Map<String, Value>, key_fields: &[&str], name: &str) -> Option<String> {
    lookup_text(record, key_fields).or_else(|| {
        let slug = to_key(name);
        (!slug.is_empty()).then_some(slug)
    })
}

fn as_record(item: &Value) -> Map<String, Value> {
    item.as_object().cloned().unwrap_or_default()
}
