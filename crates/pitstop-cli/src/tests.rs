use std::time::{SystemTime, UNIX_EPOCH};

use clap::{CommandFactory, Parser};
use pitstop_core::config::ClientConfig;
use pitstop_core::controllers::{MaintenanceDetail, MaintenanceForm};
use pitstop_core::models::{MaintenanceId, MaintenanceRecord};
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Commands, CompletionShell, RecordArgs};
use crate::commands::common::{
    format_detail_lines, format_record_lines, is_affirmative, parse_id, record_to_list_item,
    truncate,
};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::config::{
    merge_profile, missing_fields, normalize_bootstrap_url, resolve_bootstrap_url,
};
use crate::config_profiles::CliProfile;
use crate::error::CliError;

fn record(title: &str) -> MaintenanceRecord {
    MaintenanceRecord {
        id: "0190a6f4-6a2c-7c3e-8d4f-1a2b3c4d5e6f".parse().unwrap(),
        user_id: "user-1".to_string(),
        vehicle_id: None,
        title: title.to_string(),
        description: None,
        mileage: 42000.0,
        cost: Some(250.5),
        location: Some("Garage".to_string()),
        date: "2024-03-05".to_string(),
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn add_arguments_map_onto_form() {
    let cli = Cli::try_parse_from([
        "pitstop",
        "add",
        "--title",
        "Oil Change",
        "--mileage",
        "42000",
        "--date",
        "05/03/2024",
    ])
    .unwrap();

    let Commands::Add { fields } = cli.command else {
        panic!("expected add command");
    };
    assert_eq!(
        fields.into_form(),
        MaintenanceForm {
            title: "Oil Change".to_string(),
            mileage: "42000".to_string(),
            date: "05/03/2024".to_string(),
            ..MaintenanceForm::default()
        }
    );
}

#[test]
fn edit_arguments_only_replace_given_fields() {
    let mut form = MaintenanceForm {
        title: "Oil Change".to_string(),
        description: "5W-30".to_string(),
        mileage: "42000".to_string(),
        cost: "250.5".to_string(),
        location: "Garage".to_string(),
        date: "05/03/2024".to_string(),
    };
    let args = RecordArgs {
        title: Some(" Oil + filter ".to_string()),
        cost: Some(String::new()),
        ..RecordArgs::default()
    };

    args.apply_to(&mut form);

    assert_eq!(form.title, "Oil + filter");
    assert_eq!(form.cost, "");
    assert_eq!(form.description, "5W-30");
    assert_eq!(form.date, "05/03/2024");
}

#[test]
fn global_profile_flag_parses_after_subcommand() {
    let cli = Cli::try_parse_from(["pitstop", "list", "--search", "oil", "--profile", "work"])
        .unwrap();
    assert_eq!(cli.profile.as_deref(), Some("work"));
    assert!(matches!(
        cli.command,
        Commands::List { search: Some(ref query), json: false } if query == "oil"
    ));
}

#[test]
fn parse_id_rejects_garbage() {
    assert!(parse_id(" 0190a6f4-6a2c-7c3e-8d4f-1a2b3c4d5e6f ").is_ok());
    assert!(matches!(
        parse_id("not-an-id"),
        Err(CliError::InvalidId(id)) if id == "not-an-id"
    ));
}

#[test]
fn record_lines_show_marker_date_and_mileage() {
    let oil = record("Oil Change");
    let favorite_id = oil.id;

    let lines = format_record_lines(&[oil], |id| *id == favorite_id);

    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("* 0190a6f4"));
    assert!(lines[0].contains("05/03/2024"));
    assert!(lines[0].contains("Oil Change"));
    assert!(lines[0].ends_with("42000 km"));
}

#[test]
fn list_item_uses_display_date() {
    let item = record_to_list_item(&record("Oil Change"), true);
    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["date"], "05/03/2024");
    assert_eq!(value["favorite"], true);
    assert_eq!(value["cost"], 250.5);
}

#[test]
fn detail_lines_include_labels() {
    let lines = format_detail_lines(&MaintenanceDetail::from_record(&record("Oil Change")));
    assert_eq!(lines[0], "Oil Change");
    assert!(lines.contains(&"Cost:        R$ 250.5".to_string()));
    assert!(lines.contains(&"Description: N/A".to_string()));
}

#[test]
fn truncate_adds_ellipsis() {
    assert_eq!(truncate("Short", 10), "Short");
    assert_eq!(
        truncate("Replace timing belt and water pump", 20),
        "Replace timing be..."
    );
}

#[test]
fn only_yes_confirms() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative(""));
    assert!(!is_affirmative("nope"));
}

#[test]
fn normalize_bootstrap_url_requires_http_scheme() {
    assert_eq!(
        normalize_bootstrap_url("https://api.example.com/v1/bootstrap/".to_string()).unwrap(),
        "https://api.example.com/v1/bootstrap"
    );
    assert!(normalize_bootstrap_url("api.example.com/v1/bootstrap".to_string()).is_err());
}

#[test]
fn resolve_bootstrap_url_prefers_explicit_over_stored() {
    let resolved = resolve_bootstrap_url(
        Some("https://api.example.com/v1/bootstrap".to_string()),
        Some("https://stored.example.com/v1/bootstrap".to_string()),
    )
    .unwrap();
    assert_eq!(
        resolved.as_deref(),
        Some("https://api.example.com/v1/bootstrap")
    );
}

#[test]
fn merge_profile_prefers_flags_then_manifest() {
    let existing = CliProfile {
        supabase_url: Some("https://old.supabase.co".to_string()),
        supabase_anon_key: Some("old-key".to_string()),
        bootstrap_url: None,
    };
    let manifest = ClientConfig {
        supabase_url: "https://manifest.supabase.co".to_string(),
        supabase_anon_key: "manifest-key".to_string(),
    };

    let merged = merge_profile(
        &existing,
        Some("https://flag.supabase.co".to_string()),
        None,
        Some(&manifest),
        Some("https://api.example.com/v1/bootstrap".to_string()),
    );

    assert_eq!(merged.supabase_url.as_deref(), Some("https://flag.supabase.co"));
    assert_eq!(merged.supabase_anon_key.as_deref(), Some("manifest-key"));
    assert_eq!(
        merged.bootstrap_url.as_deref(),
        Some("https://api.example.com/v1/bootstrap")
    );
    assert!(missing_fields(&merged).is_empty());
    assert_eq!(
        missing_fields(&CliProfile::default()),
        vec!["supabase_url", "supabase_anon_key"]
    );
}

#[test]
fn bash_completions_name_the_binary() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("_pitstop()"));
    assert!(script.contains("complete -F _pitstop"));
}

#[test]
fn run_completions_writes_file() {
    let output_path = std::env::temp_dir().join(format!(
        "pitstop-completions-test-{}.fish",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos())
    ));

    run_completions(CompletionShell::Fish, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("complete -c pitstop"));

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn maintenance_id_displays_full_uuid() {
    let id: MaintenanceId = "0190a6f4-6a2c-7c3e-8d4f-1a2b3c4d5e6f".parse().unwrap();
    assert_eq!(id.to_string(), "0190a6f4-6a2c-7c3e-8d4f-1a2b3c4d5e6f");
}
