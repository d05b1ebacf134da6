// Wire types for the Maestro cloud API
//
// Field names follow the vendor's PascalCase JSON. Unknown fields are
// ignored; optional fields default so partially populated schemas from
// older firmware still decode.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Appliances ──────────────────────────────────────────────────────

/// One entry of the account's visible-objects list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceEntry {
    #[serde(rename = "Node")]
    pub node: ApplianceNode,
}

/// The appliance node carried by an [`ApplianceEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplianceNode {
    pub id: String,
    pub model_id: String,
    pub sensor_set_type_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unique_code: Option<String>,
}

// ── Model schema ────────────────────────────────────────────────────

/// Per-model configuration schema returned by `GET /hlapi/v1.0/Model/{id}`.
///
/// Configuration and sensor order is preserved exactly as the server
/// sends it; sensor lookup relies on that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelSchema {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_configurations: Vec<ModelConfiguration>,
}

/// A logical command group within a model schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelConfiguration {
    pub configuration_id: String,
    #[serde(default)]
    pub configuration_name: Option<String>,
    #[serde(default)]
    pub configurations: Vec<SensorConfiguration>,
}

/// A single commandable sensor within a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SensorConfiguration {
    pub sensor_id: String,
    #[serde(default)]
    pub sensor_name: Option<String>,
    #[serde(rename = "Type", default)]
    pub sensor_type: Option<String>,
    #[serde(default)]
    pub min: Option<Value>,
    #[serde(default)]
    pub max: Option<Value>,
    /// Symbolic label → vendor code. Contents are opaque vendor data.
    #[serde(default)]
    pub mappings: Option<IndexMap<String, Value>>,
    #[serde(default)]
    pub visible: bool,
}

impl SensorConfiguration {
    /// Numeric `(min, max)` range, when the schema declares both bounds.
    pub fn range(&self) -> Option<(f64, f64)> {
        let min = self.min.as_ref().and_then(Value::as_f64)?;
        let max = self.max.as_ref().and_then(Value::as_f64)?;
        Some((min, max))
    }

    /// Look up a mapped vendor value by its symbolic label.
    pub fn mapping(&self, key: &str) -> Option<&Value> {
        self.mappings.as_ref()?.get(key)
    }
}

// ── Program activation ──────────────────────────────────────────────

/// Body of `POST /mcz/v1.0/Program/ActivateProgram/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivateProgramRequest {
    pub model_id: String,
    pub configuration_id: String,
    pub sensor_set_type_id: String,
    pub commands: Vec<ProgramCommand>,
}

/// One sensor write inside an [`ActivateProgramRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgramCommand {
    pub sensor_id: String,
    pub value: Value,
}
