//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod appliances;
pub mod config_cmd;
pub mod control;
pub mod info;
pub mod raw;
pub mod status;

use maestro_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a read-only, cloud-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(controller, global).await,
        Command::Info => info::handle(controller, global).await,
        Command::Appliances => appliances::handle(controller, global).await,
        Command::RawState => raw::handle(controller, raw::Document::State, global).await,
        Command::RawStatus => raw::handle(controller, raw::Document::Status, global).await,
        Command::RawModel => raw::handle(controller, raw::Document::Model, global).await,
        // Control, Config and Completions are handled before dispatch
        Command::Power { .. }
        | Command::Temp { .. }
        | Command::PowerLevel { .. }
        | Command::Silent { .. }
        | Command::Eco { .. }
        | Command::Chrono { .. }
        | Command::Mode { .. }
        | Command::Fan { .. }
        | Command::Config(_)
        | Command::Completions(_) => unreachable!(),
    }
}
