use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pitstop_core::controllers::MaintenanceForm;

#[derive(Parser)]
#[command(name = "pitstop")]
#[command(about = "Track vehicle maintenance from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name for Supabase configuration and stored session
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List maintenance records, newest first
    #[command(alias = "ls")]
    List {
        /// Only show records whose title contains this text (case-insensitive)
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List records marked as favorite
    Favorites {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a maintenance record
    #[command(alias = "new")]
    Add {
        #[command(flatten)]
        fields: RecordArgs,
    },
    /// Edit a maintenance record; omitted fields keep their current value
    Edit {
        /// Maintenance ID
        id: String,
        #[command(flatten)]
        fields: RecordArgs,
    },
    /// Show one maintenance record
    Show {
        /// Maintenance ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a maintenance record
    Delete {
        /// Maintenance ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Toggle the favorite mark on a record
    Favorite {
        /// Maintenance ID
        id: String,
    },
    /// Show the signed-in account and its role
    Profile,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Authenticate CLI profile with Supabase
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

/// Form fields as typed on the command line. Dates are `DD/MM/YYYY`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordArgs {
    /// Short title, e.g. "Oil change"
    #[arg(long)]
    pub title: Option<String>,
    /// Odometer reading in km
    #[arg(long)]
    pub mileage: Option<String>,
    /// Service date (DD/MM/YYYY)
    #[arg(long, value_name = "DD/MM/YYYY")]
    pub date: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Amount paid
    #[arg(long)]
    pub cost: Option<String>,
    /// Workshop or place of service
    #[arg(long)]
    pub location: Option<String>,
}

impl RecordArgs {
    /// Build a blank form filled with whatever was passed.
    pub fn into_form(self) -> MaintenanceForm {
        let mut form = MaintenanceForm::default();
        self.apply_to(&mut form);
        form
    }

    /// Overwrite only the fields that were passed.
    pub fn apply_to(self, form: &mut MaintenanceForm) {
        let fields = [
            (self.title, &mut form.title),
            (self.mileage, &mut form.mileage),
            (self.date, &mut form.date),
            (self.description, &mut form.description),
            (self.cost, &mut form.cost),
            (self.location, &mut form.location),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value.trim().to_string();
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/public key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
        /// Optional bootstrap manifest URL (e.g. <https://api.example.com/v1/bootstrap>)
        #[arg(long, value_name = "URL")]
        bootstrap_url: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Login with Supabase email/password and store session in keychain
    Login {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Supabase account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Supabase account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Register a new account (email confirmation required before login)
    Signup {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        /// Must match --password
        #[arg(long, value_name = "PASSWORD")]
        confirm_password: String,
    },
    /// Show auth status for profile
    Status {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
    /// Logout profile and clear stored session
    Logout {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}
