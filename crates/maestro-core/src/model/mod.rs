// ── Domain model ──
//
// Canonical representation of a stove and its live state. Consumers
// (the CLI) depend on these types, never on the raw wire structs.

pub mod appliance;
pub mod status;

// ── Re-exports ──────────────────────────────────────────────────────

pub use appliance::{Appliance, select_appliance};
pub use status::{StoveSnapshot, StoveStatus, state_code_label};
