//! Configuration for the maestro CLI.
//!
//! TOML file, `MAESTRO_*` environment overrides, credential resolution
//! (env + keyring + plaintext), and translation to
//! `maestro_core::ControllerConfig`. The CLI layers its `GlobalOpts`
//! overrides on top of what this crate produces.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use maestro_api::{DEFAULT_BASE_URL, DEFAULT_TENANT_ID};
use maestro_core::{ApplianceSelector, ControllerConfig, TlsVerification};

/// Keyring service name under which account passwords are stored.
pub const KEYRING_SERVICE: &str = "maestro";
pub const USERNAME_ENV: &str = "MCZ_USERNAME";
pub const PASSWORD_ENV: &str = "MCZ_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no Maestro credentials configured")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Cloud endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tenant identifier sent on login.
    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,

    /// Maestro account e-mail.
    pub username: Option<String>,

    /// Account password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Appliance id or display name. First appliance when unset.
    pub appliance: Option<String>,

    /// Path to an additional CA certificate.
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tenant_id: default_tenant_id(),
            username: None,
            password: None,
            appliance: None,
            ca_cert: None,
            defaults: Defaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_tenant_id() -> String {
    DEFAULT_TENANT_ID.into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("it", "mcz", "maestro").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("maestro");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file path, then apply `MAESTRO_*` env
/// overrides. A missing file is not an error.
///
/// Nested keys use a double underscore: `MAESTRO_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MAESTRO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the account username and password.
///
/// Username: `MCZ_USERNAME`, then the config's `username`.
/// Password: `MCZ_PASSWORD`, then the system keyring, then the
/// config's plaintext `password`.
pub fn resolve_credentials(cfg: &Config) -> Result<(String, SecretString), ConfigError> {
    resolve_credentials_with(cfg, |name| std::env::var(name).ok(), keyring_password)
}

fn resolve_credentials_with(
    cfg: &Config,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<(String, SecretString), ConfigError> {
    let username = env(USERNAME_ENV)
        .or_else(|| cfg.username.clone())
        .filter(|u| !u.is_empty())
        .ok_or(ConfigError::NoCredentials)?;

    // 1. Env var
    if let Some(pw) = env(PASSWORD_ENV).filter(|p| !p.is_empty()) {
        debug!("password from environment");
        return Ok((username, SecretString::from(pw)));
    }

    // 2. Keyring
    if let Some(pw) = keyring(&username) {
        debug!("password from keyring");
        return Ok((username, SecretString::from(pw)));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = cfg.password {
        debug!("password from config file");
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials)
}

fn keyring_password(username: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, username)
        .ok()?
        .get_password()
        .ok()
}

/// Store an account password in the system keyring.
pub fn store_password(username: &str, password: &SecretString) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, username)
        .and_then(|entry| entry.set_password(password.expose_secret()))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

// ── Controller config ───────────────────────────────────────────────

/// Build a `ControllerConfig` from the loaded config -- no CLI overrides.
pub fn to_controller_config(cfg: &Config) -> Result<ControllerConfig, ConfigError> {
    let base_url: url::Url = cfg.base_url.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {}", cfg.base_url),
    })?;

    let (username, password) = resolve_credentials(cfg)?;

    let tls = if cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = cfg.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let appliance = cfg
        .appliance
        .clone()
        .filter(|a| !a.is_empty())
        .map_or(ApplianceSelector::First, ApplianceSelector::Named);

    Ok(ControllerConfig {
        base_url,
        tenant_id: cfg.tenant_id.clone(),
        username,
        password,
        tls,
        timeout: Duration::from_secs(cfg.defaults.timeout),
        appliance,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn with_user(username: &str) -> Config {
        Config {
            username: Some(username.into()),
            ..Config::default()
        }
    }

    #[test]
    fn defaults_point_at_vendor_cloud() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.tenant_id, DEFAULT_TENANT_ID);
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn file_and_env_layers_are_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                username = "stove@example.com"
                appliance = "Kitchen"

                [defaults]
                output = "json"
                "#,
            )?;
            jail.set_env("MAESTRO_APPLIANCE", "Living Room");
            jail.set_env("MAESTRO_DEFAULTS__TIMEOUT", "5");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.username.as_deref(), Some("stove@example.com"));
            assert_eq!(cfg.appliance.as_deref(), Some("Living Room"));
            assert_eq!(cfg.defaults.output, "json");
            assert_eq!(cfg.defaults.timeout, 5);
            assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        figment::Jail::expect_with(|_| {
            let cfg = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            appliance: Some("stove-1".into()),
            ..with_user("stove@example.com")
        };

        save_config_to(&cfg, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("username = \"stove@example.com\""));
        assert!(!text.contains("password"));

        let loaded: Config = toml::from_str(&text).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn env_credentials_take_priority() {
        let cfg = Config {
            password: Some("from-file".into()),
            ..with_user("file@example.com")
        };
        let env = |name: &str| match name {
            USERNAME_ENV => Some("env@example.com".to_owned()),
            PASSWORD_ENV => Some("from-env".to_owned()),
            _ => None,
        };

        let (user, pw) =
            resolve_credentials_with(&cfg, env, |_| Some("from-keyring".into())).unwrap();
        assert_eq!(user, "env@example.com");
        assert_eq!(pw.expose_secret(), "from-env");
    }

    #[test]
    fn keyring_beats_plaintext_password() {
        let cfg = Config {
            password: Some("from-file".into()),
            ..with_user("file@example.com")
        };
        let (user, pw) = resolve_credentials_with(&cfg, no_env, |u| {
            (u == "file@example.com").then(|| "from-keyring".into())
        })
        .unwrap();
        assert_eq!(user, "file@example.com");
        assert_eq!(pw.expose_secret(), "from-keyring");
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        let cfg = Config {
            password: Some("from-file".into()),
            ..with_user("file@example.com")
        };
        let (_, pw) = resolve_credentials_with(&cfg, no_env, |_| None).unwrap();
        assert_eq!(pw.expose_secret(), "from-file");
    }

    #[test]
    fn missing_credentials_are_reported() {
        let no_user = resolve_credentials_with(&Config::default(), no_env, |_| None);
        assert!(matches!(no_user, Err(ConfigError::NoCredentials)));

        let no_password = resolve_credentials_with(&with_user("a@b.c"), no_env, |_| None);
        assert!(matches!(no_password, Err(ConfigError::NoCredentials)));
    }

    #[test]
    fn invalid_base_url_is_validation_error() {
        let cfg = Config {
            base_url: "not a url".into(),
            ..Config::default()
        };
        let result = to_controller_config(&cfg);
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "base_url"
        ));
    }
}
