//! Raw document dumps for debugging and scripting.

use maestro_core::Controller;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Clone, Copy)]
pub enum Document {
    State,
    Status,
    Model,
}

pub async fn handle(
    controller: &Controller,
    document: Document,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let appliance = controller.connect().await?;
    let value = match document {
        Document::State => controller.raw_state(&appliance).await?,
        Document::Status => controller.raw_status(&appliance).await?,
        Document::Model => serde_json::to_value(controller.model(&appliance).await?)?,
    };
    let out = output::render_raw(global.output(), &value)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
