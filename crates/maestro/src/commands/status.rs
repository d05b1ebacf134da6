//! `maestro status`: condensed view of the stove's live state.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde::Serialize;

use maestro_core::{Appliance, Controller, StoveStatus};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Palette};

#[derive(Serialize)]
struct StatusView<'a> {
    appliance: &'a Appliance,
    status: &'a StoveStatus,
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let appliance = controller.connect().await?;
    let status = controller.status(&appliance).await?;
    let view = StatusView {
        appliance: &appliance,
        status: &status,
    };

    let palette = Palette::new(global.color());
    let out = output::render_single(
        global.output(),
        &view,
        |v| detail(v, palette),
        |v| v.status.state_label.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn on_off(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "on",
        Some(false) => "off",
        None => "-",
    }
}

fn celsius(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| format!("{v:.1} °C"))
}

fn detail(view: &StatusView<'_>, p: Palette) -> String {
    let s = view.status;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}",
        view.appliance.display_name().style(p.label),
        format!("({})", view.appliance.id).style(p.dim)
    );

    let state = match s.state_code {
        Some(code) => format!("{} ({code})", s.state_label),
        None => s.state_label.clone(),
    };
    let state_style = if s.in_error {
        p.bad
    } else if s.is_on {
        p.good
    } else {
        p.dim
    };

    let mut row = |label: &str, value: String| {
        let _ = writeln!(out, "  {:<13}{value}", label.style(p.label));
    };

    row("State", state.style(state_style).to_string());
    row("Power", if s.is_on { "on" } else { "off" }.to_owned());
    row("Mode", output::or_dash(s.mode.as_deref()));
    row(
        "Room",
        format!(
            "{} {} {}",
            celsius(s.ambient_temperature),
            "→".style(p.dim),
            celsius(s.target_temperature)
        ),
    );
    row("Flue gas", celsius(s.flue_temperature));
    row("Power level", output::or_dash(s.power_level));
    row(
        "Fan",
        match s.fan_speed {
            Some(6) => "auto".to_owned(),
            other => output::or_dash(other),
        },
    );
    row(
        "Eco/Silent",
        format!("{} / {}", on_off(s.eco), on_off(s.silent)),
    );
    row("Chrono", on_off(s.chrono).to_owned());
    row(
        "Pellet",
        match s.pellet_sensor_ok {
            Some(true) => "ok".style(p.good).to_string(),
            Some(false) => "low".style(p.warn).to_string(),
            None => "-".to_owned(),
        },
    );
    row(
        "Maintenance",
        s.hours_to_maintenance
            .map_or_else(|| "-".into(), |h| format!("in {h} h")),
    );
    row(
        "Connected",
        if s.connected {
            "yes".style(p.good).to_string()
        } else {
            "no".style(p.warn).to_string()
        },
    );
    if s.in_error {
        row(
            "Alarm",
            output::or_dash(s.last_alarm.as_deref())
                .style(p.bad)
                .to_string(),
        );
    }

    out.trim_end().to_owned()
}
