//! Clap derive structures for the `maestro` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace crates so the build script can compile it for man
//! page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// maestro -- control MCZ pellet stoves through the Maestro cloud
#[derive(Debug, Parser)]
#[command(
    name = "maestro",
    version,
    about = "Control MCZ Maestro pellet stoves from the command line",
    long_about = "Talks to the MCZ Maestro cloud on behalf of your account.\n\n\
        Commands are resolved against your stove's own model schema, so the\n\
        same `maestro power on` works across stove models and firmware.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Appliance id or display name (defaults to the first stove)
    #[arg(long, short = 'a', env = "MAESTRO_APPLIANCE", global = true)]
    pub appliance: Option<String>,

    /// Cloud base URL (overrides config)
    #[arg(long, env = "MAESTRO_BASE_URL", global = true, hide = true)]
    pub base_url: Option<String>,

    /// Output format (default: table, or `defaults.output` from the config)
    #[arg(long, short = 'o', env = "MAESTRO_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output (default: auto, or `defaults.color`)
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "MAESTRO_INSECURE", global = true)]
    pub insecure: bool,

    /// Additional CA certificate (PEM)
    #[arg(long, global = true, value_name = "PATH")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "MAESTRO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Effective output format once config defaults are applied.
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable (default)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Command values ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnOff {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Manual,
    Dynamic,
    Comfort,
    Overnight,
    Power,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a summary of the stove's current state
    #[command(alias = "st")]
    Status,

    /// Show the appliance identity and its model schema
    Info,

    /// Dump the raw State document as JSON
    RawState,

    /// Dump the raw Status document as JSON
    RawStatus,

    /// Dump the raw model schema as JSON
    RawModel,

    /// List appliances bound to the account
    #[command(alias = "ls")]
    Appliances,

    /// Turn the stove on or off
    Power {
        #[arg(value_enum)]
        state: OnOff,
    },

    /// Set the target room temperature (°C, 5-35)
    Temp {
        #[arg(allow_negative_numbers = true)]
        celsius: f64,
    },

    /// Set the manual power level (1-5)
    PowerLevel {
        #[arg(allow_negative_numbers = true)]
        level: i64,
    },

    /// Toggle silent mode
    Silent {
        #[arg(value_enum)]
        state: OnOff,
    },

    /// Toggle eco mode
    Eco {
        #[arg(value_enum)]
        state: OnOff,
    },

    /// Toggle the chrono (scheduled) program
    Chrono {
        #[arg(value_enum)]
        state: OnOff,
    },

    /// Select the operating mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Set the room fan speed (0-5, 6 = auto)
    Fan {
        #[arg(allow_negative_numbers = true)]
        speed: i64,
    },

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the current configuration (password redacted)
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
