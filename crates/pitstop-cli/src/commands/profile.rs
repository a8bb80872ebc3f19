use pitstop_core::controllers::ProfileController;

use crate::commands::common::Workspace;
use crate::error::CliError;

pub async fn run_profile(profile: Option<&str>) -> Result<(), CliError> {
    let workspace = Workspace::open(profile).await?;
    let summary = ProfileController::new(workspace.client, workspace.session)
        .load()
        .await?;

    println!("Email: {}", summary.email.as_deref().unwrap_or("(no email)"));
    println!("Role:  {}", summary.role_label());
    Ok(())
}
