// Cloud API authentication
//
// Username/password login against the hlapi authorization endpoint.
// The returned token is held by the client and sent as `auth-token`
// on every subsequent request.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::MaestroClient;
use crate::error::Error;

/// Tenant identifier the Maestro mobile app sends on login.
pub const DEFAULT_TENANT_ID: &str = "7c201fd8-42bd-4333-914d-0f5822070757";

pub(crate) const LOGIN_PATH: &str = "/hlapi/v1.0/Authorization/Login";

/// Account credentials for the Maestro cloud.
///
/// Immutable for the lifetime of a client. The password never appears
/// in `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl MaestroClient {
    /// Authenticate with the account credentials.
    ///
    /// `POST /hlapi/v1.0/Authorization/Login` with the `tenantid` header.
    /// On success the token replaces any previously held one. A response
    /// without a `Token` field means the credentials were rejected.
    pub async fn login(&self) -> Result<(), Error> {
        self.fetch_token().await.map(|_| ())
    }

    /// Log in and return the freshly stored token.
    pub(crate) async fn fetch_token(&self) -> Result<SecretString, Error> {
        let url = self.url(LOGIN_PATH)?;
        debug!("logging in at {}", url);

        let credentials = self.credentials();
        let body = json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .header("tenantid", self.tenant_id())
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        let token = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("Token").and_then(|t| t.as_str()).map(str::to_owned))
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            let preview: String = text.chars().take(200).collect();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {preview}"),
            });
        };

        let token = SecretString::from(token);
        self.store_token(token.clone()).await;
        debug!("login successful");
        Ok(token)
    }
}
