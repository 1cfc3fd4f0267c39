// ── Picker state ──
//
// The user's current category / room / sub-room / lamp choice. An explicit
// value passed around by reference, never ambient state. Every setter
// cascades to its dependents: a new category re-filters the room list and
// auto-selects its first room, a new room auto-selects its first sub-room.

use tracing::debug;

use crate::calc::{CalcInput, Calculation, calculate};
use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::model::{Lamp, Room, SubRoom};

/// Current selection. Stores keys only; resolve them against the
/// [`Catalog`] that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    category: Option<String>,
    room: Option<String>,
    sub_room: Option<String>,
    lamp: Option<usize>,
    /// Keys of the rooms offered for `category`, in catalog order.
    room_options: Vec<String>,
}

impl Selection {
    /// Load-time selection: first category (cascading to its first room and
    /// sub-room) and lamp 0, for whichever of those exist.
    pub fn new(catalog: &Catalog) -> Self {
        let mut selection = Self::default();
        if let Some(first) = catalog.categories().first() {
            selection.set_category(catalog, first);
        }
        if !catalog.lamps.is_empty() {
            selection.lamp = Some(0);
        }
        selection
    }

    // ── Setters ──────────────────────────────────────────────────────

    /// Select a category, re-filter the rooms and auto-select the first.
    ///
    /// An unknown category is accepted and simply offers no rooms.
    pub fn set_category(&mut self, catalog: &Catalog, category: &str) {
        self.category = Some(category.to_owned());
        self.room = None;
        self.sub_room = None;
        self.room_options = catalog.rooms_in(category).map(|r| r.key.clone()).collect();

        if let Some(room) = self.room_options.first().and_then(|key| catalog.room(key)) {
            self.apply_room(room);
        }
        debug!(category, room = ?self.room, "category selected");
    }

    /// Select a room by key and auto-select its first sub-room.
    ///
    /// A room from another category switches the category (and the room
    /// options) to that room's.
    pub fn set_room(&mut self, catalog: &Catalog, key: &str) -> Result<(), CoreError> {
        let room = catalog
            .room(key)
            .ok_or_else(|| CoreError::RoomNotFound { key: key.into() })?;
        if self.category.as_deref() != Some(room.category.as_str()) {
            self.category = Some(room.category.clone());
            self.room_options = catalog
                .rooms_in(&room.category)
                .map(|r| r.key.clone())
                .collect();
        }
        self.apply_room(room);
        debug!(room = key, sub_room = ?self.sub_room, "room selected");
        Ok(())
    }

    /// Select a sub-room of the current room. No cascade.
    pub fn set_sub_room(&mut self, catalog: &Catalog, key: &str) -> Result<(), CoreError> {
        let room = self.room(catalog).ok_or(CoreError::NoRoomSelected)?;
        if room.sub_room(key).is_none() {
            return Err(CoreError::SubRoomNotFound {
                room: room.key.clone(),
                key: key.into(),
            });
        }
        self.sub_room = Some(key.to_owned());
        Ok(())
    }

    /// Select a lamp by its position in the catalog.
    pub fn set_lamp(&mut self, catalog: &Catalog, index: usize) -> Result<(), CoreError> {
        if catalog.lamp(index).is_none() {
            return Err(CoreError::LampNotFound {
                index,
                available: catalog.lamps.len(),
            });
        }
        self.lamp = Some(index);
        Ok(())
    }

    fn apply_room(&mut self, room: &Room) {
        self.room = Some(room.key.clone());
        self.sub_room = room.sub_rooms.first().map(|s| s.key.clone());
    }

    // ── Raw accessors ────────────────────────────────────────────────

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn room_key(&self) -> Option<&str> {
        self.room.as_deref()
    }

    pub fn sub_room_key(&self) -> Option<&str> {
        self.sub_room.as_deref()
    }

    pub fn lamp_index(&self) -> Option<usize> {
        self.lamp
    }

    // ── Resolved accessors ───────────────────────────────────────────

    pub fn room<'c>(&self, catalog: &'c Catalog) -> Option<&'c Room> {
        self.room.as_deref().and_then(|key| catalog.room(key))
    }

    pub fn sub_room<'c>(&self, catalog: &'c Catalog) -> Option<&'c SubRoom> {
        let key = self.sub_room.as_deref()?;
        self.room(catalog)?.sub_room(key)
    }

    pub fn lamp<'c>(&self, catalog: &'c Catalog) -> Option<&'c Lamp> {
        self.lamp.and_then(|i| catalog.lamp(i))
    }

    /// Rooms offered for the current category.
    pub fn room_options<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Room> {
        self.room_options
            .iter()
            .filter_map(|key| catalog.room(key))
            .collect()
    }

    /// Sub-rooms offered for the current room; empty when there is none.
    pub fn sub_room_options<'c>(&self, catalog: &'c Catalog) -> &'c [SubRoom] {
        self.room(catalog)
            .map(|r| r.sub_rooms.as_slice())
            .unwrap_or_default()
    }

    /// The sub-room picker is only usable when the room has sub-rooms.
    pub fn sub_room_enabled(&self, catalog: &Catalog) -> bool {
        !self.sub_room_options(catalog).is_empty()
    }

    /// Illuminance target in effect: the sub-room's when one is selected.
    pub fn required_lux(&self, catalog: &Catalog) -> Option<f64> {
        let room = self.room(catalog)?;
        Some(self.sub_room(catalog).map_or(room.required_lux, |s| s.required_lux))
    }

    /// Run the calculator against this selection.
    pub fn calculate(&self, catalog: &Catalog, input: &CalcInput) -> Result<Calculation, CoreError> {
        calculate(
            input,
            self.room(catalog),
            self.sub_room(catalog),
            self.lamp(catalog),
        )
    }
}
