use pitstop_core::controllers::CreateMaintenanceController;

use crate::cli::RecordArgs;
use crate::commands::common::{warn_on_date_shape, Workspace};
use crate::error::CliError;

pub async fn run_add(fields: RecordArgs, profile: Option<&str>) -> Result<(), CliError> {
    let form = fields.into_form();
    warn_on_date_shape(&form);
    let workspace = Workspace::open(profile).await?;
    let controller = CreateMaintenanceController::new(workspace.client, workspace.session);

    controller.create(&form).await?;
    println!("Created \"{}\"", form.title);
    Ok(())
}
