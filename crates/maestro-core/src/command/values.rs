// ── Typed command arguments ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// On/off argument shared by the toggle commands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Label used to look the switch up in a sensor's mapping table.
    pub fn mapping_key(self) -> &'static str {
        self.into()
    }
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Operating modes exposed by the stove's mode sensor.
///
/// The vendor code behind each mode comes from the model schema's
/// mapping table; only the symbolic labels are known here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Manual,
    Dynamic,
    Comfort,
    Overnight,
    Power,
}

impl OperatingMode {
    pub fn mapping_key(self) -> &'static str {
        self.into()
    }

    /// Title-cased label for human output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Dynamic => "Dynamic",
            Self::Comfort => "Comfort",
            Self::Overnight => "Overnight",
            Self::Power => "Power",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn switch_parses_case_insensitively() {
        assert_eq!("ON".parse::<Switch>().unwrap(), Switch::On);
        assert_eq!("off".parse::<Switch>().unwrap(), Switch::Off);
        assert!("maybe".parse::<Switch>().is_err());
    }

    #[test]
    fn mapping_keys_are_lowercase() {
        assert_eq!(Switch::On.mapping_key(), "on");
        assert_eq!(OperatingMode::Overnight.mapping_key(), "overnight");
    }

    #[test]
    fn every_mode_round_trips_through_its_key() {
        for mode in OperatingMode::iter() {
            assert_eq!(mode.mapping_key().parse::<OperatingMode>().unwrap(), mode);
        }
    }
}
