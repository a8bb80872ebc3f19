use pitstop_core::controllers::MaintenanceListController;

use crate::commands::common::{parse_id, Workspace};
use crate::error::CliError;

pub async fn run_favorite(id: &str, profile: Option<&str>) -> Result<(), CliError> {
    let id = parse_id(id)?;
    let workspace = Workspace::open(profile).await?;
    let controller = MaintenanceListController::new(workspace.client, workspace.session);

    // Current marks decide whether this adds or removes.
    controller.load().await?;
    if controller.toggle_favorite(&id).await? {
        println!("Added {id} to favorites");
    } else {
        println!("Removed {id} from favorites");
    }
    Ok(())
}
