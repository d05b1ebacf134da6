// ── Sensor resolution ──
//
// Maps a sensor *name* onto the (sensor id, configuration id) pair of the
// appliance's live model schema. Sensor ids are never hard-coded: they
// differ between stove models, names mostly don't. Where names do differ
// across firmware generations, a fixed list of model-family prefixes is
// tried after the exact name.

use maestro_api::{ModelSchema, SensorConfiguration};
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Name prefixes tried, in order, after an exact match fails.
pub const SENSOR_NAME_PREFIXES: [&str; 3] = ["m1_", "m2_", "m3_"];

/// A sensor located in a model schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSensor {
    pub sensor_id: String,
    pub configuration_id: String,
    /// The schema's spelling of the name that matched.
    pub sensor_name: String,
}

/// A sensor located in a model schema together with a mapped vendor value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedSensor {
    pub sensor: ResolvedSensor,
    pub value: Value,
}

/// Find a sensor by name.
///
/// The exact name (case-insensitive) is searched across the whole schema
/// first; only then each prefixed variant, in [`SENSOR_NAME_PREFIXES`]
/// order. Within one candidate name the first sensor in schema order wins.
pub fn resolve_by_name(schema: &ModelSchema, sensor_name: &str) -> Result<ResolvedSensor, CoreError> {
    find(schema, sensor_name, |_| true)
        .map(|(sensor, configuration_id)| resolved(sensor, configuration_id))
        .ok_or_else(|| not_found(sensor_name))
}

/// Find a sensor by name that also maps `mapping_key` to a vendor value.
///
/// Sensors whose name matches but whose mapping table lacks the key are
/// skipped, so a later prefixed variant carrying the key can still match.
pub fn resolve_with_mapping(
    schema: &ModelSchema,
    sensor_name: &str,
    mapping_key: &str,
) -> Result<MappedSensor, CoreError> {
    find(schema, sensor_name, |s| s.mapping(mapping_key).is_some())
        .and_then(|(sensor, configuration_id)| {
            let value = sensor.mapping(mapping_key)?.clone();
            Some(MappedSensor {
                sensor: resolved(sensor, configuration_id),
                value,
            })
        })
        .ok_or_else(|| not_found(sensor_name))
}

/// Look up the schema entry for an already resolved sensor.
pub fn sensor_config<'a>(
    schema: &'a ModelSchema,
    resolved: &ResolvedSensor,
) -> Option<&'a SensorConfiguration> {
    schema
        .model_configurations
        .iter()
        .filter(|mc| mc.configuration_id == resolved.configuration_id)
        .flat_map(|mc| mc.configurations.iter())
        .find(|s| s.sensor_id == resolved.sensor_id)
}

/// Candidate names in priority order: exact, then each prefixed variant.
fn candidate_names(sensor_name: &str) -> impl Iterator<Item = String> + '_ {
    let target = sensor_name.to_lowercase();
    std::iter::once(target.clone()).chain(
        SENSOR_NAME_PREFIXES
            .iter()
            .map(move |prefix| format!("{prefix}{target}")),
    )
}

fn find<'a>(
    schema: &'a ModelSchema,
    sensor_name: &str,
    accept: impl Fn(&SensorConfiguration) -> bool,
) -> Option<(&'a SensorConfiguration, &'a str)> {
    candidate_names(sensor_name).find_map(|candidate| {
        schema.model_configurations.iter().find_map(|mc| {
            mc.configurations
                .iter()
                .find(|s| {
                    s.sensor_name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase() == candidate)
                        && accept(s)
                })
                .map(|s| (s, mc.configuration_id.as_str()))
        })
    })
}

fn resolved(sensor: &SensorConfiguration, configuration_id: &str) -> ResolvedSensor {
    ResolvedSensor {
        sensor_id: sensor.sensor_id.clone(),
        configuration_id: configuration_id.to_owned(),
        sensor_name: sensor.sensor_name.clone().unwrap_or_default(),
    }
}

fn not_found(sensor_name: &str) -> CoreError {
    CoreError::SensorNotFound {
        sensor: sensor_name.to_owned(),
    }
}
