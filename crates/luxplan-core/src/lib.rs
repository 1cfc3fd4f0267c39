// luxplan-core: lighting calculation engine between luxplan-api and consumers (CLI).

pub mod calc;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod selection;

// ── Primary re-exports ──────────────────────────────────────────────
pub use calc::{
    CalcInput, CalcMode, Calculation, DEFAULT_BALLAST_FACTOR, ModeOptions, Summary, calculate,
};
pub use catalog::{Catalog, load_catalog, load_catalog_with};
pub use config::CatalogConfig;
pub use error::CoreError;
pub use export::{DEFAULT_EXPORT_FILE, Exporter, rasterize, render_svg};
pub use layout::{Layout, MAX_FIXTURES, Point, Rect, Size, layout};
pub use model::{Lamp, Room, SubRoom};
pub use selection::Selection;
