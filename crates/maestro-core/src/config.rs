// ── Runtime connection configuration ──
//
// These types describe *how* to reach the Maestro cloud and which stove
// to drive. They carry credential data and connection tuning, but never
// touch disk. The CLI constructs a `ControllerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled CA roots (strict). Default for the vendor cloud.
    #[default]
    SystemDefaults,
    /// Additional CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Only meaningful against local test servers.
    DangerAcceptInvalid,
}

/// Which appliance on the account a command targets.
///
/// The account's first visible appliance is the default; `Named` lets
/// multi-stove accounts pick one by id or display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ApplianceSelector {
    #[default]
    First,
    /// Exact id, or case-insensitive display name.
    Named(String),
}

/// Connection configuration for a [`Controller`](crate::Controller).
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub base_url: Url,
    pub tenant_id: String,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    pub timeout: Duration,
    pub appliance: ApplianceSelector,
}
