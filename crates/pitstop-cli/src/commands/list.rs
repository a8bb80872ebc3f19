use pitstop_core::controllers::{filter_by_title, MaintenanceListController};

use crate::commands::common::{format_record_lines, record_to_list_item, Workspace};
use crate::error::CliError;

pub async fn run_list(
    search: Option<&str>,
    as_json: bool,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let workspace = Workspace::open(profile).await?;
    let controller = MaintenanceListController::new(workspace.client, workspace.session);
    let snapshot = controller.load().await?;

    let records = match search {
        Some(query) => filter_by_title(&snapshot.records, query),
        None => snapshot.records.clone(),
    };

    if as_json {
        let items = records
            .iter()
            .map(|record| record_to_list_item(record, snapshot.is_favorite(&record.id)))
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if snapshot.is_admin {
        println!("Signed in as administrator");
    }
    if records.is_empty() {
        println!("No maintenance records.");
    }
    for line in format_record_lines(&records, |id| snapshot.is_favorite(id)) {
        println!("{line}");
    }
    Ok(())
}
