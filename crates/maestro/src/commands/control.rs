//! Stove control commands: power, temp, power-level, silent, eco, chrono,
//! mode, fan.

use std::ops::RangeInclusive;

use owo_colors::OwoColorize;

use maestro_core::command::{FAN_SPEED_RANGE, POWER_LEVEL_RANGE};
use maestro_core::{CommandOutcome, Controller, OperatingMode, StoveCommand, Switch};

use crate::cli::{Command, GlobalOpts, ModeArg, OnOff};
use crate::error::CliError;
use crate::output::{self, Palette};

impl From<OnOff> for Switch {
    fn from(value: OnOff) -> Self {
        match value {
            OnOff::On => Switch::On,
            OnOff::Off => Switch::Off,
        }
    }
}

impl From<ModeArg> for OperatingMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Manual => OperatingMode::Manual,
            ModeArg::Dynamic => OperatingMode::Dynamic,
            ModeArg::Comfort => OperatingMode::Comfort,
            ModeArg::Overnight => OperatingMode::Overnight,
            ModeArg::Power => OperatingMode::Power,
        }
    }
}

fn small_int(field: &str, value: i64, range: &RangeInclusive<u8>) -> Result<u8, CliError> {
    u8::try_from(value)
        .ok()
        .filter(|v| range.contains(v))
        .ok_or_else(|| CliError::Validation {
            field: field.into(),
            reason: format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        })
}

/// The stove command a CLI command maps to, if it is a control command.
///
/// Arguments are fully validated here so bad input fails before any
/// configuration or network access.
pub fn stove_command(cmd: &Command) -> Result<Option<StoveCommand>, CliError> {
    let command = match *cmd {
        Command::Power { state } => StoveCommand::Power(state.into()),
        Command::Temp { celsius } => StoveCommand::Temperature(celsius),
        Command::PowerLevel { level } => {
            StoveCommand::PowerLevel(small_int("power level", level, &POWER_LEVEL_RANGE)?)
        }
        Command::Silent { state } => StoveCommand::Silent(state.into()),
        Command::Eco { state } => StoveCommand::Eco(state.into()),
        Command::Chrono { state } => StoveCommand::Chrono(state.into()),
        Command::Mode { mode } => StoveCommand::Mode(mode.into()),
        Command::Fan { speed } => StoveCommand::FanSpeed(small_int("fan speed", speed, &FAN_SPEED_RANGE)?),
        _ => return Ok(None),
    };
    command.validate()?;
    Ok(Some(command))
}

pub async fn handle(
    controller: &Controller,
    command: &StoveCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let appliance = controller.connect().await?;
    let outcome = controller.execute(&appliance, command).await?;

    let palette = Palette::new(global.color());
    let out = output::render_single(
        global.output(),
        &outcome,
        |o| confirmation(o, palette),
        |_| "ok".into(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn confirmation(outcome: &CommandOutcome, p: Palette) -> String {
    format!(
        "{} {} → {} {}",
        "✓".style(p.good),
        outcome.command,
        outcome.argument.style(p.label),
        format!("({} = {})", outcome.sensor.sensor_name, outcome.value).style(p.dim)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn read_commands_are_not_control_commands() {
        assert!(stove_command(&Command::Status).unwrap().is_none());
    }

    #[test]
    fn control_commands_map_to_stove_commands() {
        let power = stove_command(&Command::Power { state: OnOff::On }).unwrap();
        assert_eq!(power, Some(StoveCommand::Power(Switch::On)));

        let mode = stove_command(&Command::Mode {
            mode: ModeArg::Overnight,
        })
        .unwrap();
        assert_eq!(mode, Some(StoveCommand::Mode(OperatingMode::Overnight)));
    }

    #[test]
    fn out_of_range_arguments_are_usage_errors() {
        for cmd in [
            Command::Temp { celsius: 36.0 },
            Command::PowerLevel { level: 0 },
            Command::PowerLevel { level: 300 },
            Command::Fan { speed: -1 },
        ] {
            let err = stove_command(&cmd).unwrap_err();
            assert_eq!(err.exit_code(), crate::error::exit_code::USAGE, "{cmd:?}");
        }
    }
}
