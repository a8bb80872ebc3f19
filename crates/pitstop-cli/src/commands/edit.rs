use pitstop_core::controllers::EditMaintenanceController;

use crate::cli::RecordArgs;
use crate::commands::common::{parse_id, warn_on_date_shape, Workspace};
use crate::error::CliError;

pub async fn run_edit(id: &str, fields: RecordArgs, profile: Option<&str>) -> Result<(), CliError> {
    let id = parse_id(id)?;
    let workspace = Workspace::open(profile).await?;
    let controller = EditMaintenanceController::new(workspace.client, workspace.session, id);

    let mut form = controller.load().await?;
    fields.apply_to(&mut form);
    warn_on_date_shape(&form);
    controller.submit(&form).await?;
    println!("{}", controller.id());
    Ok(())
}
