// ── Controller abstraction ──
//
// One sequential pipeline per invocation: authenticate, pick the target
// appliance, then read live state or translate a semantic command into a
// program activation. The session token lives inside the single
// `MaestroClient` owned here.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use maestro_api::transport::{TlsMode, TransportConfig};
use maestro_api::{ActivateProgramRequest, Credentials, MaestroClient, ModelSchema, ProgramCommand};

use crate::command::StoveCommand;
use crate::config::{ControllerConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{Appliance, StoveSnapshot, StoveStatus, select_appliance};
use crate::resolver::ResolvedSensor;

// ── CommandPhase ─────────────────────────────────────────────────

/// Lifecycle of a single command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandPhase {
    Idle,
    SchemaFetched,
    Resolved,
    Submitted,
    Acknowledged,
    Rejected,
}

impl fmt::Display for CommandPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::SchemaFetched => "schema-fetched",
            Self::Resolved => "resolved",
            Self::Submitted => "submitted",
            Self::Acknowledged => "acknowledged",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Result of an acknowledged command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub command: &'static str,
    pub argument: String,
    pub sensor: ResolvedSensor,
    pub value: Value,
    /// The cloud's acknowledgment payload, as returned.
    pub acknowledgment: Value,
}

// ── Controller ───────────────────────────────────────────────────

/// Entry point for consumers.
///
/// Cheaply cloneable; all clones share one session.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    client: MaestroClient,
}

impl Controller {
    /// Build the session client. Does NOT log in; the first request
    /// (or [`connect()`](Self::connect)) does.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let client = MaestroClient::new(config.base_url.clone(), credentials, &transport)?
            .with_tenant_id(config.tenant_id.clone());

        Ok(Self {
            inner: Arc::new(ControllerInner { config, client }),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// The underlying session client.
    pub fn client(&self) -> &MaestroClient {
        &self.inner.client
    }

    // ── Connection ───────────────────────────────────────────────

    /// Log in and select the target appliance.
    ///
    /// An account without appliances fails with [`CoreError::NoAppliance`]
    /// before any schema is fetched.
    pub async fn connect(&self) -> Result<Appliance, CoreError> {
        self.inner.client.login().await?;
        info!("authenticated with the Maestro cloud");

        let appliances = self.appliances().await?;
        debug!(count = appliances.len(), "listed appliances");

        let appliance = select_appliance(appliances, &self.inner.config.appliance)?;
        info!(
            appliance = %appliance.id,
            name = appliance.display_name(),
            "selected appliance"
        );
        Ok(appliance)
    }

    /// Every appliance visible to the account, in server order.
    pub async fn appliances(&self) -> Result<Vec<Appliance>, CoreError> {
        let entries = self.inner.client.list_appliances().await?;
        Ok(entries.into_iter().map(Appliance::from).collect())
    }

    // ── Live data ────────────────────────────────────────────────

    /// Model schema for the appliance's model.
    pub async fn model(&self, appliance: &Appliance) -> Result<ModelSchema, CoreError> {
        let schema = self.inner.client.get_model(&appliance.model_id).await?;
        debug!(
            model = %appliance.model_id,
            configurations = schema.model_configurations.len(),
            "fetched model schema"
        );
        Ok(schema)
    }

    pub async fn raw_state(&self, appliance: &Appliance) -> Result<Value, CoreError> {
        self.inner.client.ping(&appliance.id).await?;
        Ok(self.inner.client.get_state(&appliance.id).await?)
    }

    pub async fn raw_status(&self, appliance: &Appliance) -> Result<Value, CoreError> {
        self.inner.client.ping(&appliance.id).await?;
        Ok(self.inner.client.get_status(&appliance.id).await?)
    }

    /// Ping once, then read both live documents.
    pub async fn snapshot(&self, appliance: &Appliance) -> Result<StoveSnapshot, CoreError> {
        let client = &self.inner.client;
        client.ping(&appliance.id).await?;
        let state = client.get_state(&appliance.id).await?;
        let status = client.get_status(&appliance.id).await?;
        Ok(StoveSnapshot { state, status })
    }

    pub async fn status(&self, appliance: &Appliance) -> Result<StoveStatus, CoreError> {
        let snapshot = self.snapshot(appliance).await?;
        Ok(StoveStatus::from_snapshot(&snapshot))
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Resolve `command` against the appliance's model and submit it.
    ///
    /// Argument validation runs before any network I/O. A missing
    /// acknowledgment, or an API error from the program endpoint, is
    /// reported as [`CoreError::CommandRejected`].
    pub async fn execute(
        &self,
        appliance: &Appliance,
        command: &StoveCommand,
    ) -> Result<CommandOutcome, CoreError> {
        let name = command.name();
        let mut phase = CommandPhase::Idle;
        debug!(command = name, %phase, "executing command");

        command.validate()?;

        let schema = self.model(appliance).await?;
        phase = CommandPhase::SchemaFetched;
        debug!(command = name, %phase, "command phase");

        let resolved = command.resolve(&schema)?;
        phase = CommandPhase::Resolved;
        debug!(
            command = name,
            %phase,
            sensor = %resolved.sensor.sensor_name,
            sensor_id = %resolved.sensor.sensor_id,
            "command phase"
        );

        let request = ActivateProgramRequest {
            model_id: appliance.model_id.clone(),
            configuration_id: resolved.sensor.configuration_id.clone(),
            sensor_set_type_id: appliance.sensor_set_type_id.clone(),
            commands: vec![ProgramCommand {
                sensor_id: resolved.sensor.sensor_id.clone(),
                value: resolved.value.clone(),
            }],
        };

        let submitted = self
            .inner
            .client
            .activate_program(&appliance.id, &request)
            .await;
        phase = CommandPhase::Submitted;
        debug!(command = name, %phase, "command phase");

        let acknowledgment = match submitted {
            Ok(Some(ack)) => ack,
            Ok(None) => {
                phase = CommandPhase::Rejected;
                warn!(command = name, %phase, "no acknowledgment from the cloud");
                return Err(rejected(name, "no acknowledgment returned"));
            }
            Err(maestro_api::Error::Api { status, message }) => {
                phase = CommandPhase::Rejected;
                warn!(command = name, %phase, status, "program activation failed");
                return Err(rejected(name, &format!("HTTP {status}: {message}")));
            }
            Err(e) => return Err(e.into()),
        };

        phase = CommandPhase::Acknowledged;
        info!(command = name, argument = %command.argument(), %phase, "command applied");

        Ok(CommandOutcome {
            command: name,
            argument: command.argument(),
            sensor: resolved.sensor,
            value: resolved.value,
            acknowledgment,
        })
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

fn rejected(command: &str, message: &str) -> CoreError {
    CoreError::CommandRejected {
        command: command.to_owned(),
        message: message.to_owned(),
    }
}
