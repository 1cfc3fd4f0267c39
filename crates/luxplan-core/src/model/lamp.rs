// ── Lamp domain type ──

use serde::{Deserialize, Serialize};

/// A lamp from the catalog. Immutable after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lamp {
    /// Never empty: falls back to `"{brand} {model}"`, then `"Lamp {n}"`.
    pub name: String,
    /// Power draw in watts.
    pub watt: f64,
    /// Rated luminous flux in lumens.
    pub lumen: f64,
    /// Every other field of the source record, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Lamp {
    /// Human-readable label, e.g. `"Philips TL-D (18 W, 1350 lm)"`.
    pub fn describe(&self) -> String {
        format!("{} ({} W, {} lm)", self.name, self.watt, self.lumen)
    }
}
