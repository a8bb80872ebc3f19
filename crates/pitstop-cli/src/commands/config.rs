use std::env;

use pitstop_core::config::{fetch_bootstrap_manifest, ClientConfig};

use crate::cli::ConfigCommands;
use crate::config_profiles::{is_http_url, normalize_text_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

const BOOTSTRAP_URL_ENV: &str = "PITSTOP_BOOTSTRAP_URL";

pub async fn run_config(
    command: ConfigCommands,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            supabase_url,
            supabase_anon_key,
            bootstrap_url,
            no_activate,
        } => {
            run_config_init(
                profile.as_deref().or(global_profile),
                supabase_url,
                supabase_anon_key,
                bootstrap_url,
                no_activate,
            )
            .await
        }
    }
}

/// Merge order per field: flag, bootstrap manifest, environment, stored value.
#[allow(clippy::needless_pass_by_value)]
pub async fn run_config_init(
    profile_name: Option<&str>,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    bootstrap_url: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing_profile = config.profile(&profile_name).cloned().unwrap_or_default();

    let explicit_supabase_url = normalize_text_option(supabase_url);
    let explicit_supabase_anon_key = normalize_text_option(supabase_anon_key);
    let bootstrap_url = resolve_bootstrap_url(
        normalize_text_option(bootstrap_url),
        existing_profile.bootstrap_url.clone(),
    )?;

    let should_fetch_bootstrap =
        explicit_supabase_url.is_none() || explicit_supabase_anon_key.is_none();
    let manifest = match bootstrap_url.as_deref() {
        Some(url) if should_fetch_bootstrap => {
            let manifest = fetch_bootstrap_manifest(url).await.map_err(|error| {
                CliError::Config(format!(
                    "Failed to load bootstrap manifest from {url}: {error}"
                ))
            })?;
            println!("Loaded bootstrap manifest from {url}");
            Some(manifest)
        }
        _ => None,
    };

    let merged = merge_profile(
        &existing_profile,
        explicit_supabase_url,
        explicit_supabase_anon_key,
        manifest.as_ref(),
        bootstrap_url,
    );
    validate_profile_urls(&merged)?;
    *config.profile_mut_or_default(&profile_name) = merged;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let profile = config
        .profile(&profile_name)
        .ok_or_else(|| CliError::Config("Failed to persist profile".to_string()))?;
    let missing_fields = missing_fields(profile);
    if missing_fields.is_empty() {
        println!(
            "Profile '{profile_name}' is ready. Run `pitstop auth login --email <email> --password <password>`."
        );
    } else {
        println!(
            "Profile '{}' is missing: {}",
            profile_name,
            missing_fields.join(", ")
        );
    }

    Ok(())
}

pub fn merge_profile(
    existing: &CliProfile,
    explicit_supabase_url: Option<String>,
    explicit_supabase_anon_key: Option<String>,
    manifest: Option<&ClientConfig>,
    bootstrap_url: Option<String>,
) -> CliProfile {
    CliProfile {
        supabase_url: explicit_supabase_url
            .or_else(|| manifest.map(|manifest| manifest.supabase_url.clone()))
            .or_else(|| normalize_text_option(env::var("SUPABASE_URL").ok()))
            .or_else(|| existing.supabase_url()),
        supabase_anon_key: explicit_supabase_anon_key
            .or_else(|| manifest.map(|manifest| manifest.supabase_anon_key.clone()))
            .or_else(|| normalize_text_option(env::var("SUPABASE_ANON_KEY").ok()))
            .or_else(|| existing.supabase_anon_key()),
        bootstrap_url,
    }
}

pub fn missing_fields(profile: &CliProfile) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if profile.supabase_url().is_none() {
        missing.push("supabase_url");
    }
    if profile.supabase_anon_key().is_none() {
        missing.push("supabase_anon_key");
    }
    missing
}

pub fn resolve_bootstrap_url(
    explicit_bootstrap_url: Option<String>,
    existing_bootstrap_url: Option<String>,
) -> Result<Option<String>, CliError> {
    explicit_bootstrap_url
        .or_else(|| normalize_text_option(env::var(BOOTSTRAP_URL_ENV).ok()))
        .or(existing_bootstrap_url)
        .map(normalize_bootstrap_url)
        .transpose()
}

pub fn normalize_bootstrap_url(url: String) -> Result<String, CliError> {
    let normalized = normalize_text_option(Some(url))
        .ok_or_else(|| CliError::Config("bootstrap_url must not be empty".to_string()))?;
    if !is_http_url(&normalized) {
        return Err(CliError::Config(
            "bootstrap_url must include http:// or https://".to_string(),
        ));
    }
    Ok(normalized.trim_end_matches('/').to_string())
}

fn validate_profile_urls(profile: &CliProfile) -> Result<(), CliError> {
    if let Some(url) = profile.supabase_url() {
        if !is_http_url(&url) {
            return Err(CliError::Config(
                "supabase_url must include http:// or https://".to_string(),
            ));
        }
    }
    Ok(())
}
