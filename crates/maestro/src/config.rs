//! CLI configuration -- thin wrapper around `maestro_config`.
//!
//! Applies `GlobalOpts` flag overrides (--base-url, --appliance, ...)
//! on top of the file + environment configuration.

use clap::ValueEnum;
use maestro_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use maestro_config::{
    Config, Defaults, KEYRING_SERVICE, config_path, load_config, load_config_or_default, save_config,
    store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Apply CLI flag overrides to a loaded config.
pub fn apply_overrides(mut cfg: Config, global: &GlobalOpts) -> Config {
    if let Some(ref url) = global.base_url {
        cfg.base_url.clone_from(url);
    }
    if let Some(ref appliance) = global.appliance {
        cfg.appliance = Some(appliance.clone());
    }
    if let Some(ref ca_cert) = global.ca_cert {
        cfg.ca_cert = Some(ca_cert.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.defaults.timeout = timeout;
    }
    if global.insecure {
        cfg.defaults.insecure = true;
    }
    cfg
}

/// Build the controller configuration for this invocation.
///
/// A malformed config file is an error; a missing one is not.
pub fn controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let cfg = apply_overrides(load_config()?, global);
    let controller = maestro_config::to_controller_config(&cfg)?;
    tracing::debug!(
        base_url = %controller.base_url,
        username = %controller.username,
        appliance = ?controller.appliance,
        insecure = matches!(controller.tls, TlsVerification::DangerAcceptInvalid),
        "resolved controller config"
    );
    Ok(controller)
}

/// Fill `--output` and `--color` from `[defaults]` when neither the flag
/// nor its env var was given. Unknown values are logged and ignored.
pub fn apply_display_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    if global.output.is_none() {
        global.output = parse_default("defaults.output", &defaults.output);
    }
    if global.color.is_none() {
        global.color = parse_default("defaults.color", &defaults.color);
    }
}

fn parse_default<T: ValueEnum>(field: &str, value: &str) -> Option<T> {
    T::from_str(value, true)
        .inspect_err(|e| tracing::warn!(field, value, "ignoring config value: {e}"))
        .ok()
}
