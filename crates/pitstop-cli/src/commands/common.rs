use std::io::{self, BufRead, Write};
use std::sync::Arc;

use pitstop_core::auth::SessionApi;
use pitstop_core::config::ClientConfig;
use pitstop_core::controllers::{MaintenanceDetail, MaintenanceForm, SessionContext};
use pitstop_core::date::{is_display_format, to_display};
use pitstop_core::models::{format_number, MaintenanceId, MaintenanceRecord};
use pitstop_core::remote::{RemoteDataClient, SupabaseDataClient};
use pitstop_core::Error;
use serde::Serialize;

use crate::auth::{auth_client, ProfileAuthClient};
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

const TITLE_WIDTH: usize = 32;

/// A resolved profile with usable Supabase settings.
pub struct Profile {
    pub name: String,
    pub config: ClientConfig,
}

impl Profile {
    pub fn resolve(explicit: Option<&str>) -> Result<Self, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        let name = config.resolve_profile_name(explicit);
        let client_config = config
            .profile(&name)
            .cloned()
            .unwrap_or_default()
            .client_config()
            .map_err(|error| CliError::Config(error.to_string()))?
            .ok_or_else(|| {
                CliError::Config(format!(
                    "Profile '{name}' missing Supabase config. Run `pitstop config init --profile {name}` or set SUPABASE_URL and SUPABASE_ANON_KEY."
                ))
            })?;
        Ok(Self {
            name,
            config: client_config,
        })
    }

    pub fn auth_client(&self) -> Result<ProfileAuthClient, CliError> {
        auth_client(&self.name, &self.config).map_err(|error| CliError::Auth(error.to_string()))
    }
}

/// Data client and session for a signed-in profile.
pub struct Workspace {
    pub client: Arc<SupabaseDataClient>,
    pub session: SessionContext,
}

impl Workspace {
    /// Restore (and refresh if needed) the stored session. No session is
    /// `Unauthenticated`.
    pub async fn open(explicit_profile: Option<&str>) -> Result<Self, CliError> {
        let profile = Profile::resolve(explicit_profile)?;
        let auth = profile.auth_client()?;
        let session = auth
            .restore_session()
            .await
            .map_err(|error| CliError::Auth(error.to_string()))?
            .ok_or(Error::Unauthenticated)?;

        let client = SupabaseDataClient::new(&profile.config, session.access_token.clone())?;
        tracing::debug!(profile = %profile.name, user_id = %session.user.id, "Workspace opened");
        Ok(Self {
            client: Arc::new(client),
            session: SessionContext::from(Some(session)),
        })
    }

    /// Fetch one record for screens that are handed a record to show.
    pub async fn fetch_record(&self, id: &MaintenanceId) -> Result<MaintenanceRecord, CliError> {
        self.session.user_id()?;
        let record = self
            .client
            .get_maintenance(id)
            .await
            .map_err(|error| Error::LoadFailed(error.to_string()))?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(record)
    }

    pub async fn favorite_ids(&self) -> Result<Vec<MaintenanceId>, CliError> {
        let user_id = self.session.user_id()?;
        let marks = self
            .client
            .list_favorites(user_id)
            .await
            .map_err(|error| Error::LoadFailed(error.to_string()))?;
        Ok(marks.into_iter().map(|mark| mark.maintenance_id).collect())
    }
}

/// Signed-in user as seen by the session API, if any.
pub async fn current_user_label<A: SessionApi>(api: &A) -> Result<Option<String>, CliError> {
    let user = api
        .current_user()
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?;
    Ok(user.map(|user| user.email.unwrap_or(user.id)))
}

pub fn parse_id(id: &str) -> Result<MaintenanceId, CliError> {
    id.parse::<MaintenanceId>()
        .map_err(|_| CliError::InvalidId(id.trim().to_string()))
}

#[derive(Debug, Serialize)]
pub struct MaintenanceListItem {
    pub id: String,
    pub title: String,
    pub date: String,
    pub mileage: f64,
    pub cost: Option<f64>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub favorite: bool,
}

pub fn record_to_list_item(record: &MaintenanceRecord, favorite: bool) -> MaintenanceListItem {
    MaintenanceListItem {
        id: record.id.to_string(),
        title: record.title.clone(),
        date: to_display(&record.date),
        mileage: record.mileage,
        cost: record.cost,
        location: record.location.clone(),
        description: record.description.clone(),
        favorite,
    }
}

/// One line per record: favorite marker, id, display date, title, mileage.
pub fn format_record_lines(
    records: &[MaintenanceRecord],
    is_favorite: impl Fn(&MaintenanceId) -> bool,
) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            let marker = if is_favorite(&record.id) { '*' } else { ' ' };
            let title = truncate(&record.title, TITLE_WIDTH);
            format!(
                "{marker} {}  {:<10}  {title:<width$}  {} km",
                record.id,
                to_display(&record.date),
                format_number(record.mileage),
                width = TITLE_WIDTH,
            )
        })
        .collect()
}

pub fn format_detail_lines(detail: &MaintenanceDetail) -> Vec<String> {
    let mut lines = vec![detail.title.clone(), detail.id.to_string()];
    lines.extend(detail.rows.iter().map(|row| {
        let label = format!("{}:", row.label);
        format!("{label:<12} {}", row.value)
    }));
    lines
}

/// Forms are not rejected for an odd date shape; the user only gets a hint.
pub fn warn_on_date_shape(form: &MaintenanceForm) {
    if !form.date.is_empty() && !is_display_format(&form.date) {
        tracing::warn!(date = %form.date, "Date is not DD/MM/YYYY; it will be stored as typed");
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
