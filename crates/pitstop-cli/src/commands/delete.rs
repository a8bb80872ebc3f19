use pitstop_core::controllers::MaintenanceDetailController;

use crate::commands::common::{confirm, parse_id, Workspace};
use crate::error::CliError;

pub async fn run_delete(
    id: &str,
    skip_prompt: bool,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let id = parse_id(id)?;
    let workspace = Workspace::open(profile).await?;
    let record = workspace.fetch_record(&id).await?;
    let controller = MaintenanceDetailController::new(workspace.client, workspace.session, &record);

    let pending = controller.request_delete();
    let prompt = format!("Delete \"{}\"? This cannot be undone.", record.title);
    if skip_prompt || confirm(&prompt)? {
        pending.confirm().await?;
        println!("{id}");
    } else {
        pending.cancel();
        println!("Delete cancelled");
    }
    Ok(())
}
