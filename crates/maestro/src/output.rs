//! Rendering for every `--output` format.
//!
//! Lists become `tabled` tables and single items get hand-built detail
//! views. JSON and YAML serialize the domain types directly.

use std::io::{self, IsTerminal, Write};

use owo_colors::Style as Paint;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Whether stdout gets ANSI styling. `NO_COLOR` disables `auto`.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Palette for detail views; every style is a no-op when color is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub label: Paint,
    pub good: Paint,
    pub warn: Paint,
    pub bad: Paint,
    pub dim: Paint,
}

impl Palette {
    pub fn new(mode: ColorMode) -> Self {
        if should_color(mode) {
            Self {
                label: Paint::new().cyan().bold(),
                good: Paint::new().green(),
                warn: Paint::new().yellow(),
                bad: Paint::new().red().bold(),
                dim: Paint::new().dimmed(),
            }
        } else {
            Self {
                label: Paint::new(),
                good: Paint::new(),
                warn: Paint::new(),
                bad: Paint::new(),
                dim: Paint::new(),
            }
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a collection for `--output`.
///
/// Tables go through `to_row`; the structured formats serialize `data`
/// itself, so JSON keeps fields the table leaves out. Plain prints
/// `id_fn` per item.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render one item for `--output`. The table format is a hand-built
/// detail view from `detail_fn`.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Render a raw document: pretty JSON unless a structured format was asked for.
pub fn render_raw(format: OutputFormat, data: &serde_json::Value) -> Result<String, CliError> {
    match format {
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Table | OutputFormat::Json | OutputFormat::Plain => render_json(data, false),
    }
}

/// Write to stdout unless `--quiet` or there is nothing to show.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

/// Optional value or a dash.
pub fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}
