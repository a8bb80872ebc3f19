use pitstop_core::controllers::MaintenanceDetail;

use crate::commands::common::{format_detail_lines, parse_id, record_to_list_item, Workspace};
use crate::error::CliError;

pub async fn run_show(id: &str, as_json: bool, profile: Option<&str>) -> Result<(), CliError> {
    let id = parse_id(id)?;
    let workspace = Workspace::open(profile).await?;
    let record = workspace.fetch_record(&id).await?;

    if as_json {
        let favorite = workspace.favorite_ids().await?.contains(&record.id);
        println!(
            "{}",
            serde_json::to_string_pretty(&record_to_list_item(&record, favorite))?
        );
    } else {
        for line in format_detail_lines(&MaintenanceDetail::from_record(&record)) {
            println!("{line}");
        }
    }
    Ok(())
}
