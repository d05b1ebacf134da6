use thiserror::Error;

/// Top-level error type for the `maestro-api` crate.
///
/// Covers every failure mode of the cloud API: authentication, transport,
/// unexpected payloads, and non-success HTTP statuses.
/// `maestro-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed, or the session was rejected again after a refresh.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// The response was not JSON, or did not have the expected shape.
    /// Carries the raw body for debugging.
    #[error("Protocol error: {message}")]
    Protocol { message: String, body: String },

    /// Non-success HTTP status other than 401.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// Returns `true` if the session or credentials were rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for connection-level failures and timeouts.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Build a `Protocol` error with a bounded body preview in the message.
    pub(crate) fn protocol(reason: impl std::fmt::Display, body: &str) -> Self {
        let preview: String = body.chars().take(200).collect();
        Self::Protocol {
            message: format!("{reason} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    }
}
