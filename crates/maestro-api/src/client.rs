// Maestro cloud HTTP client
//
// Wraps `reqwest::Client` with token-authenticated requests, lazy login,
// and a single transparent re-login when the server rejects the session.
// Endpoint wrappers (appliances, model, program) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::{Credentials, DEFAULT_TENANT_ID};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Default cloud endpoint used by the Maestro mobile app.
pub const DEFAULT_BASE_URL: &str = "https://s.maestro.mcz.it";

/// Session-authenticated client for the Maestro cloud API.
///
/// Holds the account credentials and a nullable bearer token. The token is
/// obtained lazily on the first request and refreshed at most once per
/// request when the server answers 401.
pub struct MaestroClient {
    http: reqwest::Client,
    base_url: Url,
    tenant_id: String,
    credentials: Credentials,
    token: RwLock<Option<SecretString>>,
}

impl MaestroClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            tenant_id: DEFAULT_TENANT_ID.to_owned(),
            credentials,
            token: RwLock::new(None),
        }
    }

    /// Override the tenant identifier sent on login.
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = tenant_id.into();
        self
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The cloud base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether a session token is currently held.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    // ── Token management ─────────────────────────────────────────────

    pub(crate) async fn store_token(&self, token: SecretString) {
        trace!("storing session token");
        *self.token.write().await = Some(token);
    }

    async fn invalidate_token(&self) {
        *self.token.write().await = None;
    }

    /// Return the held token, logging in first if there is none.
    async fn current_token(&self) -> Result<SecretString, Error> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        debug!("no session token held, logging in");
        self.fetch_token().await
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an absolute API path (e.g. `/hlapi/v1.0/Model/{id}`).
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Issue an authenticated request and return the JSON payload.
    ///
    /// Logs in lazily when no token is held. A 401 triggers exactly one
    /// re-login followed by one retry of the same request; a second 401
    /// is reported as [`Error::Authentication`].
    ///
    /// An empty response body is returned as `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let token = self.current_token().await?;
        let resp = self.send(&method, &url, body, &token).await?;

        if resp.status() != StatusCode::UNAUTHORIZED {
            return parse_json(resp).await;
        }

        warn!(%url, "session token rejected, logging in again");
        self.invalidate_token().await;
        let token = self.fetch_token().await?;
        let resp = self.send(&method, &url, body, &token).await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
            return Err(Error::Authentication {
                message: "session rejected again after token refresh".into(),
            });
        }

        parse_json(resp).await
    }

    async fn send(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&Value>,
        token: &SecretString,
    ) -> Result<reqwest::Response, Error> {
        debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header("auth-token", token.expose_secret());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder.send().await.map_err(Error::Transport)
    }

    /// Send a GET request and deserialize the payload.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        let value = self.request(Method::GET, url, None).await?;
        decode(value)
    }

    /// Send a POST request with a JSON body and return the raw payload.
    pub(crate) async fn post(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        let url = self.url(path)?;
        let body = serde_json::to_value(body)
            .map_err(|e| Error::protocol(format!("failed to encode request: {e}"), ""))?;
        self.request(Method::POST, url, Some(&body)).await
    }
}

/// Decode a JSON payload into a typed structure.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value::<T>(value.clone())
        .map_err(|e| Error::protocol(format!("unexpected payload shape: {e}"), &value.to_string()))
}

/// Read a response body as JSON.
///
/// Non-success statuses become [`Error::Api`]; a non-JSON body becomes
/// [`Error::Protocol`].
async fn parse_json(resp: reqwest::Response) -> Result<Value, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        let preview: String = body.chars().take(200).collect();
        return Err(Error::Api {
            status: status.as_u16(),
            message: if preview.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                preview
            },
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| Error::protocol(format!("invalid JSON: {e}"), &body))
}
