//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::SecretString;
use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Copy of the config that is safe to print.
#[derive(Serialize)]
struct ShownConfig {
    path: String,
    #[serde(flatten)]
    config: Config,
}

fn redacted(mut cfg: Config) -> Config {
    if cfg.password.is_some() {
        cfg.password = Some("********".into());
    }
    cfg
}

fn show_detail(shown: &ShownConfig) -> String {
    let c = &shown.config;
    let lines = [
        ("Config file", shown.path.clone()),
        ("Base URL", c.base_url.clone()),
        ("Tenant ID", c.tenant_id.clone()),
        ("Username", output::or_dash(c.username.as_deref())),
        (
            "Password",
            if c.password.is_some() {
                "(in config file)".into()
            } else {
                "(keyring or MCZ_PASSWORD)".into()
            },
        ),
        (
            "Appliance",
            c.appliance
                .clone()
                .unwrap_or_else(|| "(first on account)".into()),
        ),
        (
            "CA cert",
            output::or_dash(c.ca_cert.as_ref().map(|p| p.display().to_string())),
        ),
        ("Insecure TLS", c.defaults.insecure.to_string()),
        ("Timeout", format!("{}s", c.defaults.timeout)),
        ("Output", c.defaults.output.clone()),
    ];
    lines
        .iter()
        .map(|(label, value)| format!("{label:<14}{value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => init(),

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::apply_overrides(config::load_config()?, global);
            let shown = ShownConfig {
                path: config::config_path().display().to_string(),
                config: redacted(cfg),
            };
            let out = output::render_single(global.output(), &shown, show_detail, |s| {
                s.path.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("MCZ Maestro -- configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config_or_default();

    // 1. Account
    let username: String = Input::new()
        .with_prompt("Maestro account e-mail")
        .with_initial_text(cfg.username.clone().unwrap_or_default())
        .interact_text()
        .map_err(prompt_err)?;

    let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;

    if username.is_empty() || password.is_empty() {
        return Err(CliError::Validation {
            field: "credentials".into(),
            reason: "e-mail and password cannot be empty".into(),
        });
    }

    // 2. Password storage
    let store_choices = &[
        "Store password in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    cfg.password = if store_selection == 0 {
        config::store_password(&username, &SecretString::from(password))?;
        eprintln!("   ✓ Password stored in system keyring ({})", config::KEYRING_SERVICE);
        None
    } else {
        Some(password)
    };
    cfg.username = Some(username);

    // 3. Appliance
    let appliance: String = Input::new()
        .with_prompt("Appliance name or id (empty = first on account)")
        .allow_empty(true)
        .with_initial_text(cfg.appliance.clone().unwrap_or_default())
        .interact_text()
        .map_err(prompt_err)?;
    cfg.appliance = Some(appliance).filter(|a| !a.trim().is_empty());

    // 4. Write config
    let path = config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", path.display());
    eprintln!("\n  Test it: maestro status");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_never_prints_plaintext_password() {
        let cfg = Config {
            username: Some("stove@example.com".into()),
            password: Some("hunter2".into()),
            ..Config::default()
        };
        let shown = ShownConfig {
            path: "/tmp/config.toml".into(),
            config: redacted(cfg),
        };

        let detail = show_detail(&shown);
        assert!(!detail.contains("hunter2"));
        assert!(detail.contains("stove@example.com"));

        let json = serde_json::to_string(&shown).unwrap_or_default();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"path\""));
    }
}
