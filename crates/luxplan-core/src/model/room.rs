// ── Room and sub-room domain types ──

use serde::{Deserialize, Serialize};

/// A room from the catalog.
///
/// `key` is expected to be unique across the collection; lookups return the
/// first match when it is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub key: String,
    pub category: String,
    pub name: String,
    /// Target illuminance in lux.
    pub required_lux: f64,
    /// Suggested number of fixtures from the catalog. Informational only.
    pub fixture_count_hint: u32,
    pub sub_rooms: Vec<SubRoom>,
}

impl Room {
    pub fn sub_room(&self, key: &str) -> Option<&SubRoom> {
        self.sub_rooms.iter().find(|s| s.key == key)
    }

    pub fn has_sub_rooms(&self) -> bool {
        !self.sub_rooms.is_empty()
    }
}

/// A named subdivision of a room. Its `required_lux` overrides the parent's
/// when selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRoom {
    /// Unique within the parent room.
    pub key: String,
    pub name: String,
    pub required_lux: f64,
    pub fixture_count_hint: u32,
}
