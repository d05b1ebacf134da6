mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use maestro_core::Controller;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse();

    init_tracing(cli.global.verbose);
    let defaults = config::load_config_or_default().defaults;
    config::apply_display_defaults(&mut cli.global, &defaults);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need the cloud
        Command::Config(ref args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(ref args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "maestro", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            // Control arguments are checked before credentials or network
            let stove_command = commands::control::stove_command(&cmd)?;

            let controller = Controller::new(config::controller_config(&cli.global)?)?;
            tracing::debug!(command = ?cmd, "dispatching command");

            match stove_command {
                Some(command) => commands::control::handle(&controller, &command, &cli.global).await,
                None => commands::dispatch(cmd, &controller, &cli.global).await,
            }
        }
    }
}
