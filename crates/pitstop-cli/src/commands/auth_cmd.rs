use std::sync::Arc;

use pitstop_core::controllers::AuthController;

use crate::auth::{auth_client, clear_stored_session, load_stored_session};
use crate::cli::AuthCommands;
use crate::commands::common::{current_user_label, Profile};
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        AuthCommands::Login {
            profile,
            email,
            password,
        } => {
            let profile = Profile::resolve(profile.as_deref().or(global_profile))?;
            let controller = AuthController::new(Arc::new(profile.auth_client()?));
            let (session, _) = controller.login(&email, &password).await?;
            let email_label = session.user.email.as_deref().unwrap_or("(no email)");
            println!("Signed in profile '{}' as {email_label}", profile.name);
            Ok(())
        }
        AuthCommands::Signup {
            profile,
            email,
            password,
            confirm_password,
        } => {
            let profile = Profile::resolve(profile.as_deref().or(global_profile))?;
            let controller = AuthController::new(Arc::new(profile.auth_client()?));
            let notice = controller
                .signup(&email, &password, &confirm_password)
                .await?;
            println!("{}", notice.message);
            println!(
                "Then run `pitstop auth login --profile {} --email {}`.",
                profile.name,
                email.trim()
            );
            Ok(())
        }
        AuthCommands::Status { profile } => {
            let config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            let client_config = config
                .profile(&profile_name)
                .cloned()
                .unwrap_or_default()
                .client_config()
                .map_err(|error| CliError::Config(error.to_string()))?;

            let user_label = if let Some(client_config) = client_config {
                let auth = auth_client(&profile_name, &client_config)
                    .map_err(|error| CliError::Auth(error.to_string()))?;
                current_user_label(&auth).await?
            } else {
                load_stored_session(&profile_name)
                    .map_err(|error| CliError::Auth(error.to_string()))?
                    .map(|session| session.user.email.unwrap_or(session.user.id))
            };

            match user_label {
                Some(label) => println!("Profile '{profile_name}' is signed in as {label}"),
                None => println!("Profile '{profile_name}' is not signed in."),
            }
            Ok(())
        }
        AuthCommands::Logout { profile } => {
            let explicit = profile.as_deref().or(global_profile);
            match Profile::resolve(explicit) {
                Ok(profile) => {
                    let controller = AuthController::new(Arc::new(profile.auth_client()?));
                    controller.logout().await?;
                    println!("Signed out profile '{}'", profile.name);
                }
                Err(CliError::Config(reason)) => {
                    tracing::debug!(%reason, "No Supabase config; clearing stored session only");
                    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
                    let profile_name = config.resolve_profile_name(explicit);
                    clear_stored_session(&profile_name)
                        .map_err(|error| CliError::Auth(error.to_string()))?;
                    println!("Signed out profile '{profile_name}'");
                }
                Err(error) => return Err(error),
            }
            Ok(())
        }
    }
}
