// ── Stove status summary ──
//
// Field selection over the raw State / Status documents. Status wins when
// both carry a key; State fills the gaps. Anything absent stays `None` so
// renderers can skip it.

use serde::Serialize;
use serde_json::Value;

/// Stove state codes that mean the burner is not running.
const OFF_STATE_CODES: [i64; 6] = [0, 40, 41, 44, 45, 46];

/// Human-readable label for a stove state code.
pub fn state_code_label(code: i64) -> Option<&'static str> {
    let label = match code {
        0 => "Off",
        1 => "Checking",
        2 => "Cleaning (cold)",
        3 => "Loading pellets (cold)",
        4 => "Start 1 (cold)",
        5 => "Start 2 (cold)",
        6 => "Cleaning (hot)",
        7 => "Loading pellets (hot)",
        8 => "Start 1 (hot)",
        9 => "Start 2 (hot)",
        10 => "Stabilising",
        11 => "Power 1",
        12 => "Power 2",
        13 => "Power 3",
        14 => "Power 4",
        15 => "Power 5",
        30 => "Diagnostics",
        31 => "On",
        40 => "Extinguishing",
        41 => "Cooling",
        42 => "Cleaning (low)",
        43 => "Cleaning (high)",
        44 => "Unlocking screw",
        45 => "Auto eco",
        46 => "Standby",
        50 => "Error: ignition failed",
        51 => "Error: no flame",
        52 => "Error: tank overheating",
        53 => "Error: flue gas temperature too high",
        _ => return None,
    };
    Some(label)
}

/// Snapshot of the raw live documents for one appliance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoveSnapshot {
    pub state: Value,
    pub status: Value,
}

/// Condensed, renderer-friendly view of a [`StoveSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoveStatus {
    pub connected: bool,
    pub state_code: Option<i64>,
    pub state_label: String,
    pub is_on: bool,
    pub mode: Option<String>,
    pub ambient_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    pub flue_temperature: Option<f64>,
    pub power_level: Option<i64>,
    pub fan_speed: Option<i64>,
    pub eco: Option<bool>,
    pub silent: Option<bool>,
    pub chrono: Option<bool>,
    pub pellet_sensor_ok: Option<bool>,
    pub in_error: bool,
    pub last_alarm: Option<String>,
    pub hours_to_maintenance: Option<i64>,
}

impl StoveStatus {
    pub fn from_snapshot(snapshot: &StoveSnapshot) -> Self {
        let lookup = Lookup {
            state: &snapshot.state,
            status: &snapshot.status,
        };

        let state_code = lookup
            .integer("stato_stufa")
            .or_else(|| snapshot.state.get("state").and_then(Value::as_i64));
        let state_label = state_code
            .and_then(state_code_label)
            .map(str::to_owned)
            .or_else(|| lookup.text("fase_op"))
            .or_else(|| lookup.text("Status"))
            .or_else(|| snapshot.state.get("state").map(value_text))
            .unwrap_or_else(|| "Unknown".to_owned());

        let is_on = match state_code {
            Some(code) => (1..=46).contains(&code) && !OFF_STATE_CODES.contains(&code),
            None => lookup.flag("power_enabled").unwrap_or(false),
        };

        let in_error = lookup.flag("IsInError").unwrap_or(false);

        Self {
            connected: lookup.flag("IsConnected").unwrap_or(false),
            state_code,
            state_label,
            is_on,
            mode: lookup.text("mod_lav_att"),
            ambient_temperature: lookup.number("temp_amb_install"),
            target_temperature: lookup.number("set_amb1"),
            flue_temperature: lookup.number("temp_fumi"),
            power_level: lookup.integer("potenza_att"),
            fan_speed: lookup.integer("set_vent_v1"),
            eco: lookup.flag("att_eco"),
            silent: lookup
                .flag("silent_enabled")
                .or_else(|| lookup.flag("silent")),
            chrono: lookup.flag("crono_enabled"),
            pellet_sensor_ok: lookup.flag("sens_liv_pellet"),
            in_error,
            last_alarm: in_error
                .then(|| snapshot.state.get("last_alarm").map(value_text))
                .flatten(),
            hours_to_maintenance: lookup.integer("ore_prox_manut"),
        }
    }
}

struct Lookup<'a> {
    state: &'a Value,
    status: &'a Value,
}

impl Lookup<'_> {
    fn get(&self, key: &str) -> Option<&Value> {
        [self.status, self.state]
            .into_iter()
            .filter_map(|doc| doc.get(key))
            .find(|v| !v.is_null())
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn integer(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f.round() as i64))
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            _ => None,
        }
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(value_text).filter(|s| !s.is_empty())
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
