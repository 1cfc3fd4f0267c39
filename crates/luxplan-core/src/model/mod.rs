// ── Canonical catalog model ──
//
// Every type here is the normalized shape of a loosely structured catalog
// record. Consumers (selection, calculator, CLI) only ever see these.

pub mod lamp;
pub mod room;

pub use lamp::Lamp;
pub use room::{Room, SubRoom};
