//! Pitstop CLI - Command-line interface for tracking vehicle maintenance
//!
//! Records, favorites and auth live in a hosted Supabase project; the CLI
//! stores a per-profile session in the OS keychain.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{
    add::run_add, auth_cmd::run_auth, completions::run_completions, config::run_config,
    delete::run_delete, edit::run_edit, favorite::run_favorite, favorites::run_favorites,
    list::run_list, profile::run_profile, show::run_show,
};
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "pitstop=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::List { search, json } => run_list(search.as_deref(), json, profile).await,
        Commands::Favorites { json } => run_favorites(json, profile).await,
        Commands::Add { fields } => run_add(fields, profile).await,
        Commands::Edit { id, fields } => run_edit(&id, fields, profile).await,
        Commands::Show { id, json } => run_show(&id, json, profile).await,
        Commands::Delete { id, yes } => run_delete(&id, yes, profile).await,
        Commands::Favorite { id } => run_favorite(&id, profile).await,
        Commands::Profile => run_profile(profile).await,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
        Commands::Config { command } => run_config(command, profile).await,
        Commands::Auth { command } => run_auth(command, profile).await,
    }
}
