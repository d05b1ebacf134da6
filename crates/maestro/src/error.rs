//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use maestro_config::ConfigError;
use maestro_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Maestro cloud at {url}")]
    #[diagnostic(
        code(maestro::connection_failed),
        help(
            "Check your network connection.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(maestro::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(maestro::auth_failed),
        help(
            "Verify your Maestro account e-mail and password.\n\
             Run: maestro config init"
        )
    )]
    AuthFailed { message: String },

    #[error("No Maestro credentials configured")]
    #[diagnostic(
        code(maestro::no_credentials),
        help(
            "Configure credentials with: maestro config init\n\
             Or set MCZ_USERNAME and MCZ_PASSWORD.\n\
             Config file: {path}"
        )
    )]
    NoCredentials { path: String },

    // ── Appliances & sensors ─────────────────────────────────────────

    #[error("No stove found on this account")]
    #[diagnostic(
        code(maestro::no_appliance),
        help("Pair your stove in the MCZ Maestro app first.")
    )]
    NoAppliance,

    #[error("Appliance '{identifier}' not found")]
    #[diagnostic(
        code(maestro::appliance_not_found),
        help("Run: maestro appliances to see the stoves on this account")
    )]
    ApplianceNotFound { identifier: String },

    #[error("Your stove does not expose a '{sensor}' sensor")]
    #[diagnostic(
        code(maestro::sensor_not_found),
        help(
            "This stove model may not support the command.\n\
             Run: maestro info to list the sensors it exposes"
        )
    )]
    SensorNotFound { sensor: String },

    // ── Commands ─────────────────────────────────────────────────────

    #[error("The stove rejected '{command}': {message}")]
    #[diagnostic(code(maestro::command_rejected))]
    CommandRejected { command: String, message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(maestro::api_error))]
    ApiError { message: String },

    #[error("Unexpected response from the Maestro cloud: {message}")]
    #[diagnostic(
        code(maestro::protocol),
        help("Re-run with -vv to see the raw exchange.")
    )]
    Protocol { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(maestro::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(maestro::config),
        help("Inspect it with: maestro config show")
    )]
    Config { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(maestro::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NoAppliance | Self::ApplianceNotFound { .. } | Self::SensorNotFound { .. } => {
                exit_code::NOT_FOUND
            }
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::NoAppliance => CliError::NoAppliance,
            CoreError::ApplianceNotFound { identifier } => CliError::ApplianceNotFound { identifier },
            CoreError::SensorNotFound { sensor } => CliError::SensorNotFound { sensor },
            CoreError::CommandRejected { command, message } => {
                CliError::CommandRejected { command, message }
            }
            CoreError::Validation { message } => CliError::Validation {
                field: "argument".into(),
                reason: message,
            },
            CoreError::Protocol { message } => CliError::Protocol { message },
            CoreError::Api { message, status } => CliError::ApiError {
                message: match status {
                    Some(status) => format!("HTTP {status}: {message}"),
                    None => message,
                },
            },
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials => CliError::NoCredentials {
                path: maestro_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        let sensor: CliError = CoreError::SensorNotFound {
            sensor: "set_amb1".into(),
        }
        .into();
        assert_eq!(sensor.exit_code(), exit_code::NOT_FOUND);

        let rejected: CliError = CoreError::CommandRejected {
            command: "power".into(),
            message: "no acknowledgment returned".into(),
        }
        .into();
        assert_eq!(rejected.exit_code(), exit_code::GENERAL);

        let auth: CliError = CoreError::AuthenticationFailed {
            message: "session rejected".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let invalid: CliError = CoreError::Validation {
            message: "out of range".into(),
        }
        .into();
        assert_eq!(invalid.exit_code(), exit_code::USAGE);

        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(ConfigError::NoCredentials).exit_code(),
            exit_code::AUTH
        );
    }
}
