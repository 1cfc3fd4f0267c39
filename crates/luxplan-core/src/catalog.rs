// ── Normalized catalog ──
//
// Process-wide read-only data: populated once at startup from the two raw
// documents, never mutated afterwards.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use luxplan_api::{CatalogClient, TransportConfig};

use crate::config::CatalogConfig;
use crate::convert::{normalize_lamps, normalize_rooms};
use crate::error::CoreError;
use crate::model::{Lamp, Room};

/// The canonical lamp and room collections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub lamps: Vec<Lamp>,
    pub rooms: Vec<Room>,
}

impl Catalog {
    pub fn new(lamps: Vec<Lamp>, rooms: Vec<Room>) -> Self {
        Self { lamps, rooms }
    }

    /// Normalize raw lamp and room documents.
    pub fn from_raw(lamps: &Value, rooms: &Value) -> Self {
        Self::new(normalize_lamps(lamps), normalize_rooms(rooms))
    }

    /// Distinct non-empty categories in first-occurrence order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for room in &self.rooms {
            let cat = room.category.as_str();
            if !cat.is_empty() && !seen.contains(&cat) {
                seen.push(cat);
            }
        }
        seen
    }

    /// Rooms in `category`, in catalog order.
    pub fn rooms_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Room> + 'a {
        self.rooms.iter().filter(move |r| r.category == category)
    }

    /// First room with this key.
    pub fn room(&self, key: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.key == key)
    }

    pub fn lamp(&self, index: usize) -> Option<&Lamp> {
        self.lamps.get(index)
    }
}

// ── Loading ─────────────────────────────────────────────────────────

/// Fetch both catalogs concurrently and normalize them.
///
/// Either fetch failing fails the whole load; a partial catalog is never
/// returned.
pub async fn load_catalog(config: &CatalogConfig) -> Result<Catalog, CoreError> {
    let client = CatalogClient::new(&TransportConfig::with_timeout(config.timeout))?;
    load_catalog_with(&client, config).await
}

/// Like [`load_catalog`], with a caller-supplied client.
pub async fn load_catalog_with(
    client: &CatalogClient,
    config: &CatalogConfig,
) -> Result<Catalog, CoreError> {
    debug!(lamps = %config.lamps, rooms = %config.rooms, "loading catalog");
    let (lamps, rooms) = client.fetch_pair(&config.lamps, &config.rooms).await?;

    let catalog = Catalog::from_raw(&lamps, &rooms);
    info!(
        lamps = catalog.lamps.len(),
        rooms = catalog.rooms.len(),
        "catalog loaded"
    );
    Ok(catalog)
}
