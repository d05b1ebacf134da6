//! `maestro appliances`: every stove bound to the account.

use tabled::Tabled;

use maestro_core::{Appliance, Controller};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ApplianceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model_id: String,
    #[tabled(rename = "Serial")]
    unique_code: String,
}

fn row(a: &Appliance) -> ApplianceRow {
    ApplianceRow {
        id: a.id.clone(),
        name: output::or_dash(a.name.as_deref()),
        model_id: a.model_id.clone(),
        unique_code: output::or_dash(a.unique_code.as_deref()),
    }
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let appliances = controller.appliances().await?;
    if appliances.is_empty() && global.output() == OutputFormat::Table {
        if !global.quiet {
            eprintln!("No appliances on this account");
        }
        return Ok(());
    }
    let out = output::render_list(global.output(), &appliances, row, |a| a.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
