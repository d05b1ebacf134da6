// maestro-core: Command resolution and stove control between maestro-api and the CLI.

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod resolver;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{CommandPlan, OperatingMode, ResolvedCommand, StoveCommand, Switch, ValueSource};
pub use config::{ApplianceSelector, ControllerConfig, TlsVerification};
pub use controller::{CommandOutcome, CommandPhase, Controller};
pub use error::CoreError;
pub use resolver::{MappedSensor, ResolvedSensor, resolve_by_name, resolve_with_mapping};

pub use model::{Appliance, StoveSnapshot, StoveStatus, state_code_label};

// Wire types consumers render directly.
pub use maestro_api::{ModelConfiguration, ModelSchema, SensorConfiguration};
