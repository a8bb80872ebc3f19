use pitstop_core::controllers::FavoritesController;

use crate::commands::common::{format_record_lines, record_to_list_item, Workspace};
use crate::error::CliError;

pub async fn run_favorites(as_json: bool, profile: Option<&str>) -> Result<(), CliError> {
    let workspace = Workspace::open(profile).await?;
    let controller = FavoritesController::new(workspace.client, workspace.session);
    let favorites = controller.load().await?;

    if as_json {
        let items = favorites
            .iter()
            .map(|record| record_to_list_item(record, true))
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if favorites.is_empty() {
        println!("No favorites yet.");
    } else {
        for line in format_record_lines(&favorites, |_| true) {
            println!("{line}");
        }
    }
    Ok(())
}
