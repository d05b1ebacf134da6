// ── Stove commands ──
//
// Every control command the CLI exposes is a `StoveCommand`. A command
// knows which sensor names may carry it (in priority order) and how its
// value is produced: as a vendor code from the sensor's mapping table,
// as a literal, or a mapping with a literal fallback for sensors that
// carry no mapping table at all.

pub mod values;

use std::ops::RangeInclusive;

use maestro_api::ModelSchema;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::CoreError;
use crate::resolver::{self, ResolvedSensor};

pub use values::{OperatingMode, Switch};

pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 5.0..=35.0;
pub const POWER_LEVEL_RANGE: RangeInclusive<u8> = 1..=5;
/// 0–5 are fixed speeds, 6 is automatic.
pub const FAN_SPEED_RANGE: RangeInclusive<u8> = 0..=6;

/// A semantic control command for one stove.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoveCommand {
    Power(Switch),
    /// Target room temperature in °C.
    Temperature(f64),
    PowerLevel(u8),
    Silent(Switch),
    Eco(Switch),
    Chrono(Switch),
    Mode(OperatingMode),
    FanSpeed(u8),
}

/// How the value sent to the sensor is obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
    /// Vendor code stored under `key` in the sensor's mapping table.
    Mapped { key: &'static str },
    /// Mapped code when any candidate carries one, otherwise `fallback`
    /// on a candidate without a mapping table.
    MappedOr { key: &'static str, fallback: Value },
    /// Literal value written as is.
    Literal(Value),
}

/// Sensor candidates and value strategy for a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandPlan {
    pub candidates: &'static [&'static str],
    pub value: ValueSource,
}

/// A command bound to a concrete sensor of one model schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCommand {
    pub sensor: ResolvedSensor,
    pub value: Value,
}

impl StoveCommand {
    /// CLI-facing command name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Power(_) => "power",
            Self::Temperature(_) => "temp",
            Self::PowerLevel(_) => "power-level",
            Self::Silent(_) => "silent",
            Self::Eco(_) => "eco",
            Self::Chrono(_) => "chrono",
            Self::Mode(_) => "mode",
            Self::FanSpeed(_) => "fan",
        }
    }

    /// The command's argument as the user typed it.
    pub fn argument(&self) -> String {
        match self {
            Self::Power(s) | Self::Silent(s) | Self::Eco(s) | Self::Chrono(s) => s.to_string(),
            Self::Temperature(t) => t.to_string(),
            Self::PowerLevel(n) | Self::FanSpeed(n) => n.to_string(),
            Self::Mode(m) => m.to_string(),
        }
    }

    /// Check the argument against the command's fixed bounds.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |message: String| Err(CoreError::Validation { message });
        match *self {
            Self::Temperature(t) if !TEMPERATURE_RANGE.contains(&t) => invalid(format!(
                "temperature must be between {} and {} °C, got {t}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end()
            )),
            Self::PowerLevel(n) if !POWER_LEVEL_RANGE.contains(&n) => invalid(format!(
                "power level must be between {} and {}, got {n}",
                POWER_LEVEL_RANGE.start(),
                POWER_LEVEL_RANGE.end()
            )),
            Self::FanSpeed(n) if !FAN_SPEED_RANGE.contains(&n) => invalid(format!(
                "fan speed must be between {} and {}, got {n}",
                FAN_SPEED_RANGE.start(),
                FAN_SPEED_RANGE.end()
            )),
            _ => Ok(()),
        }
    }

    pub fn plan(&self) -> CommandPlan {
        let toggle = |candidates: &'static [&'static str], switch: Switch| CommandPlan {
            candidates,
            value: ValueSource::MappedOr {
                key: switch.mapping_key(),
                fallback: json!(switch.is_on()),
            },
        };

        match *self {
            Self::Power(s) => toggle(&["power_enabled", "stato_stufa"], s),
            Self::Silent(s) => toggle(&["silent_enabled", "silent"], s),
            Self::Eco(s) => toggle(&["att_eco", "eco_mode"], s),
            Self::Chrono(s) => toggle(&["crono_enabled"], s),
            Self::Temperature(t) => CommandPlan {
                candidates: &["set_amb1", "set_amb2", "set_amb3"],
                value: ValueSource::Literal(json!(t)),
            },
            Self::PowerLevel(n) => CommandPlan {
                candidates: &["potenza_att", "set_pot_man"],
                value: ValueSource::Literal(json!(n)),
            },
            Self::Mode(m) => CommandPlan {
                candidates: &["mod_lav_att"],
                value: ValueSource::Mapped {
                    key: m.mapping_key(),
                },
            },
            Self::FanSpeed(n) => CommandPlan {
                candidates: &["set_vent_v1"],
                value: ValueSource::Literal(json!(n)),
            },
        }
    }

    /// Bind the command to a sensor of `schema`.
    ///
    /// Mapping lookups run over every candidate before any literal
    /// fallback is considered, so a code-valued sensor is never sent a
    /// bare boolean. Literal numbers are checked against the sensor's
    /// declared range when the schema has one; mapped codes never are.
    pub fn resolve(&self, schema: &ModelSchema) -> Result<ResolvedCommand, CoreError> {
        self.validate()?;
        let plan = self.plan();
        let primary = plan.candidates.first().copied().unwrap_or_default();

        let resolved = match &plan.value {
            ValueSource::Mapped { key } => resolve_mapped(schema, plan.candidates, key),
            ValueSource::MappedOr { key, fallback } => {
                resolve_mapped(schema, plan.candidates, key).or_else(|| {
                    resolve_unmapped(schema, plan.candidates).map(|sensor| ResolvedCommand {
                        sensor,
                        value: fallback.clone(),
                    })
                })
            }
            ValueSource::Literal(value) => {
                resolve_literal(schema, plan.candidates).map(|sensor| ResolvedCommand {
                    sensor,
                    value: value.clone(),
                })
            }
        };

        let resolved = resolved.ok_or_else(|| CoreError::SensorNotFound {
            sensor: primary.to_owned(),
        })?;

        // Mapped codes are vendor data and may sit outside Min/Max
        if matches!(plan.value, ValueSource::Literal(_)) {
            check_range(schema, &resolved)?;
        }
        debug!(
            command = self.name(),
            sensor = %resolved.sensor.sensor_name,
            value = %resolved.value,
            "resolved command"
        );
        Ok(resolved)
    }
}

fn resolve_mapped(schema: &ModelSchema, candidates: &[&str], key: &str) -> Option<ResolvedCommand> {
    candidates.iter().find_map(|name| {
        resolver::resolve_with_mapping(schema, name, key)
            .ok()
            .map(|mapped| ResolvedCommand {
                sensor: mapped.sensor,
                value: mapped.value,
            })
    })
}

/// First candidate that resolves to a sensor without a mapping table.
fn resolve_unmapped(schema: &ModelSchema, candidates: &[&str]) -> Option<ResolvedSensor> {
    candidates.iter().find_map(|name| {
        let sensor = resolver::resolve_by_name(schema, name).ok()?;
        let has_mappings = resolver::sensor_config(schema, &sensor)
            .is_some_and(|cfg| cfg.mappings.as_ref().is_some_and(|m| !m.is_empty()));
        (!has_mappings).then_some(sensor)
    })
}

fn resolve_literal(schema: &ModelSchema, candidates: &[&str]) -> Option<ResolvedSensor> {
    candidates
        .iter()
        .find_map(|name| resolver::resolve_by_name(schema, name).ok())
}

fn check_range(schema: &ModelSchema, resolved: &ResolvedCommand) -> Result<(), CoreError> {
    let Some(value) = resolved.value.as_f64() else {
        return Ok(());
    };
    let Some((min, max)) =
        resolver::sensor_config(schema, &resolved.sensor).and_then(|cfg| cfg.range())
    else {
        return Ok(());
    };
    if value < min || value > max {
        return Err(CoreError::Validation {
            message: format!(
                "{value} is outside the range [{min}, {max}] of sensor '{}'",
                resolved.sensor.sensor_name
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn schema(value: Value) -> ModelSchema {
        serde_json::from_value(value).unwrap()
    }

    fn power_schema() -> ModelSchema {
        schema(json!({
            "ModelConfigurations": [{
                "ConfigurationId": "cfg-power",
                "ConfigurationName": "Power",
                "Configurations": [{
                    "SensorId": "s-power",
                    "SensorName": "power_enabled",
                    "Type": "Int",
                    "Mappings": { "on": 1, "off": 40 }
                }]
            }]
        }))
    }

    #[test]
    fn power_on_uses_mapped_code_not_boolean() {
        let resolved = StoveCommand::Power(Switch::On)
            .resolve(&power_schema())
            .unwrap();
        assert_eq!(resolved.value, json!(1));
        assert_eq!(resolved.sensor.sensor_id, "s-power");
        assert_eq!(resolved.sensor.configuration_id, "cfg-power");
    }

    #[test]
    fn power_off_uses_mapped_code() {
        let resolved = StoveCommand::Power(Switch::Off)
            .resolve(&power_schema())
            .unwrap();
        assert_eq!(resolved.value, json!(40));
    }

    #[test]
    fn power_falls_back_to_state_sensor_mapping() {
        let schema = schema(json!({
            "ModelConfigurations": [{
                "ConfigurationId": "c",
                "Configurations": [
                    { "SensorId": "s-bool", "SensorName": "power_enabled", "Type": "Boolean" },
                    { "SensorId": "s-state", "SensorName": "stato_stufa",
                      "Mappings": { "on": 31, "off": 40 } }
                ]
            }]
        }));
        let resolved = StoveCommand::Power(Switch::On).resolve(&schema).unwrap();
        assert_eq!(resolved.sensor.sensor_id, "s-state");
        assert_eq!(resolved.value, json!(31));
    }

    #[test]
    fn toggle_without_mapping_sends_boolean() {
        let schema = schema(json!({
            "ModelConfigurations": [{
                "ConfigurationId": "c",
                "Configurations": [
                    { "SensorId": "s-eco", "SensorName": "m1_att_eco", "Type": "Boolean" }
                ]
            }]
        }));
        let resolved = StoveCommand::Eco(Switch::On).resolve(&schema).unwrap();
        assert_eq!(resolved.sensor.sensor_id, "s-eco");
        assert_eq!(resolved.value, json!(true));
    }

    #[test]
    fn toggle_never_sends_boolean_to_mapped_sensor() {
        let schema = schema(json!({
            "ModelConfigurations": [{
                "ConfigurationId": "c",
                "Configurations": [
                    { "SensorId": "s", "SensorName": "crono_enabled",
                      "Mappings": { "enabled": 1, "disabled": 0 } }
                ]
            }]
        }));
        let result = StoveCommand::Chrono(Switch::On).resolve(&schema);
        assert!(matches!(
            result,
            Err(CoreError::SensorNotFound { ref sensor }) if sensor == "crono_enabled"
        ));
    }

    #[test]
    fn temperature_uses_alternate_sensor_name() {
        let schema = schema(json!({
            "ModelConfigurations": [{
                "ConfigurationId": "c",
                "Configurations": [
                    { "SensorId": "s-amb2", "SensorName": "set_amb2", "Min": 5, "Max": 35 }
                ]
            }]
        }));
        let resolved = StoveCommand::Temperature(21.5).resolve(&schema).unwrap();
        assert_eq!(resolved.sensor.sensor_id, "s-amb2");
        assert_eq!(resolved.value, json!(21.5));
    }

    #[test]
    fn schema_range_is_enforced() {
        let schema = schema(json!({
            "ModelConfigurations": [{
                "ConfigurationId": "c",
                "Configurations": [
                    { "SensorId": "s", "SensorName": "set_amb1", "Min": 7, "Max": 30 }
                ]
            }]
        }));
        let result = StoveCommand::Temperature(32.0).resolve(&schema);
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }

    #[test]
    fn mapped_code_ignores_schema_range() {
        let schema = schema(json!({
            "ModelConfigurations": [{
                "ConfigurationId": "c",
                "Configurations": [
                    { "SensorId": "s-power", "SensorName": "power_enabled", "Type": "Int",
                      "Min": 0, "Max": 1, "Mappings": { "on": 1, "off": 40 } }
                ]
            }]
        }));
        let resolved = StoveCommand::Power(Switch::Off).resolve(&schema).unwrap();
        assert_eq!(resolved.sensor.sensor_id, "s-power");
        assert_eq!(resolved.value, json!(40));
    }

    #[test]
    fn mode_requires_mapping() {
        let schema = schema(json!({
            "ModelConfigurations": [{
                "ConfigurationId": "c",
                "Configurations": [
                    { "SensorId": "s-mode", "SensorName": "mod_lav_att",
                      "Mappings": { "manual": "M", "comfort": "C" } }
                ]
            }]
        }));
        let comfort = StoveCommand::Mode(OperatingMode::Comfort)
            .resolve(&schema)
            .unwrap();
        assert_eq!(comfort.value, json!("C"));

        let result = StoveCommand::Mode(OperatingMode::Overnight).resolve(&schema);
        assert!(matches!(result, Err(CoreError::SensorNotFound { .. })));
    }

    #[test]
    fn out_of_range_arguments_fail_validation() {
        assert!(StoveCommand::Temperature(4.5).validate().is_err());
        assert!(StoveCommand::Temperature(f64::NAN).validate().is_err());
        assert!(StoveCommand::PowerLevel(0).validate().is_err());
        assert!(StoveCommand::PowerLevel(6).validate().is_err());
        assert!(StoveCommand::FanSpeed(7).validate().is_err());
        assert!(StoveCommand::FanSpeed(6).validate().is_ok());
        assert!(StoveCommand::Temperature(35.0).validate().is_ok());
    }

    #[test]
    fn validation_runs_before_resolution() {
        let result = StoveCommand::PowerLevel(9).resolve(&ModelSchema::default());
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }

    #[test]
    fn names_and_arguments() {
        assert_eq!(StoveCommand::PowerLevel(3).name(), "power-level");
        assert_eq!(StoveCommand::Silent(Switch::Off).argument(), "off");
        assert_eq!(StoveCommand::Temperature(21.5).argument(), "21.5");
        assert_eq!(StoveCommand::Mode(OperatingMode::Dynamic).argument(), "dynamic");
    }
}
