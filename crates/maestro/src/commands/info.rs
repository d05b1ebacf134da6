//! `maestro info`: appliance identity plus its model schema.
//!
//! The sensor listing is what users need when a command reports a
//! missing sensor: it shows every name the stove model exposes.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use maestro_core::{Appliance, Controller, ModelSchema, SensorConfiguration};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Palette};

#[derive(Serialize)]
struct InfoView {
    appliance: Appliance,
    model: ModelSchema,
}

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "")]
    visible: &'static str,
    #[tabled(rename = "Sensor")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    sensor_type: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Mappings")]
    mappings: String,
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let appliance = controller.connect().await?;
    let model = controller.model(&appliance).await?;
    let view = InfoView { appliance, model };

    let palette = Palette::new(global.color());
    let out = output::render_single(global.output(), &view, |v| detail(v, palette), sensor_names)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn sensor_names(view: &InfoView) -> String {
    view.model
        .model_configurations
        .iter()
        .flat_map(|mc| mc.configurations.iter())
        .filter_map(|s| s.sensor_name.clone())
        .collect::<Vec<_>>()
        .join("\n")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn sensor_row(sensor: &SensorConfiguration) -> SensorRow {
    let bound = |v: Option<&Value>| v.map_or_else(String::new, value_text);
    let range = if sensor.min.is_some() || sensor.max.is_some() {
        format!("{}..{}", bound(sensor.min.as_ref()), bound(sensor.max.as_ref()))
    } else {
        "-".into()
    };
    let mappings = sensor.mappings.as_ref().map_or_else(
        || "-".into(),
        |m| {
            m.iter()
                .map(|(k, v)| format!("{k}={}", value_text(v)))
                .collect::<Vec<_>>()
                .join(", ")
        },
    );

    SensorRow {
        visible: if sensor.visible { "●" } else { "○" },
        name: output::or_dash(sensor.sensor_name.as_deref()),
        id: sensor.sensor_id.clone(),
        sensor_type: output::or_dash(sensor.sensor_type.as_deref()),
        range,
        mappings,
    }
}

fn detail(view: &InfoView, p: Palette) -> String {
    let a = &view.appliance;
    let mut out = String::new();

    let _ = writeln!(out, "{}", a.display_name().style(p.label));
    let _ = writeln!(out, "  {:<18}{}", "Appliance ID", a.id);
    let _ = writeln!(out, "  {:<18}{}", "Model ID", a.model_id);
    let _ = writeln!(out, "  {:<18}{}", "Sensor set type", a.sensor_set_type_id);
    let _ = writeln!(out, "  {:<18}{}", "Serial", output::or_dash(a.unique_code.as_deref()));
    let _ = writeln!(
        out,
        "  {:<18}{}",
        "Model",
        output::or_dash(view.model.model_name.as_deref())
    );

    for mc in &view.model.model_configurations {
        let title = mc.configuration_name.as_deref().unwrap_or("(unnamed)");
        let _ = writeln!(
            out,
            "\n{} {}",
            title.style(p.label),
            format!("[{}]", mc.configuration_id).style(p.dim)
        );
        if mc.configurations.is_empty() {
            let _ = writeln!(out, "  {}", "no sensors".style(p.dim));
            continue;
        }
        let rows: Vec<SensorRow> = mc.configurations.iter().map(sensor_row).collect();
        let _ = writeln!(out, "{}", output::render_table(&rows));
    }

    out.trim_end().to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sensor_row_formats_range_and_mappings() {
        let sensor: SensorConfiguration = serde_json::from_value(json!({
            "SensorId": "s-1",
            "SensorName": "power_enabled",
            "Type": "Int",
            "Min": 0,
            "Max": 40,
            "Mappings": { "on": 1, "off": 40 },
            "Visible": true
        }))
        .unwrap();

        let row = sensor_row(&sensor);
        assert_eq!(row.visible, "●");
        assert_eq!(row.range, "0..40");
        assert_eq!(row.mappings, "on=1, off=40");
    }
}
