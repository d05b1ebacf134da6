// maestro-api: Async Rust client for the MCZ Maestro pellet-stove cloud API

pub mod appliances;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod program;
pub mod transport;

pub use auth::{Credentials, DEFAULT_TENANT_ID};
pub use client::{DEFAULT_BASE_URL, MaestroClient};
pub use error::Error;
pub use models::{
    ActivateProgramRequest, ApplianceEntry, ApplianceNode, ModelConfiguration, ModelSchema,
    ProgramCommand, SensorConfiguration,
};
pub use transport::{TlsMode, TransportConfig};

pub use reqwest::Method;
