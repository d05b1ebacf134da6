// ── Core error types ──
//
// User-facing errors from maestro-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<maestro_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to the Maestro cloud at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Appliance errors ─────────────────────────────────────────────
    #[error("No stove found on this account")]
    NoAppliance,

    #[error("Appliance not found: {identifier}")]
    ApplianceNotFound { identifier: String },

    // ── Command errors ───────────────────────────────────────────────
    /// No sensor in the appliance's model schema matches the command.
    #[error("Sensor '{sensor}' not found in the stove model")]
    SensorNotFound { sensor: String },

    /// The command endpoint answered without a usable acknowledgment.
    #[error("Command '{command}' was rejected: {message}")]
    CommandRejected { command: String, message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    /// Malformed or unexpectedly shaped response.
    #[error("Unexpected response from the Maestro cloud: {message}")]
    Protocol { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<maestro_api::Error> for CoreError {
    fn from(err: maestro_api::Error) -> Self {
        match err {
            maestro_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            maestro_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            maestro_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            maestro_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            maestro_api::Error::Protocol { message, body: _ } => CoreError::Protocol { message },
            maestro_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
        }
    }
}
