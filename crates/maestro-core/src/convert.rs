// ── API-to-domain type conversions ──
//
// Bridges raw `maestro_api` response types into `maestro_core::model`
// domain types. Blank display names are normalized to `None`.

use maestro_api::{ApplianceEntry, ApplianceNode};

use crate::model::Appliance;

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

// ── Appliance ──────────────────────────────────────────────────────

impl From<ApplianceNode> for Appliance {
    fn from(node: ApplianceNode) -> Self {
        Self {
            id: node.id,
            model_id: node.model_id,
            sensor_set_type_id: node.sensor_set_type_id,
            name: non_blank(node.name),
            unique_code: non_blank(node.unique_code),
        }
    }
}

impl From<ApplianceEntry> for Appliance {
    fn from(entry: ApplianceEntry) -> Self {
        entry.node.into()
    }
}
