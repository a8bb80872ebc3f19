//! PostgREST (`/rest/v1`) implementation of `RemoteDataClient`.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{RemoteDataClient, RemoteError, RemoteResult};
use crate::config::ClientConfig;
use crate::models::{
    FavoriteMark, MaintenanceFields, MaintenanceId, MaintenanceRecord, NewMaintenance, Role,
    UserProfile,
};
use crate::util::parse_api_error;

const MAINTENANCES: &str = "maintenances";
const FAVORITES: &str = "favorites";
const PROFILES: &str = "profiles";

/// Table client bound to one signed-in user's access token.
///
/// Row-level security on the backend decides what the token may see; the
/// client adds the `user_id` filters the screens expect on top of that.
#[derive(Clone)]
pub struct SupabaseDataClient {
    rest_url: String,
    anon_key: String,
    access_token: String,
    client: Client,
}

impl std::fmt::Debug for SupabaseDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseDataClient")
            .field("rest_url", &self.rest_url)
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SupabaseDataClient {
    pub fn new(config: &ClientConfig, access_token: impl Into<String>) -> RemoteResult<Self> {
        let rest_url = config
            .rest_url()
            .map_err(RemoteError::InvalidConfiguration)?;
        let anon_key = config.supabase_anon_key.trim().to_string();
        if anon_key.is_empty() {
            return Err(RemoteError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(RemoteError::InvalidConfiguration(
                "Access token must not be empty",
            ));
        }

        Ok(Self {
            rest_url,
            anon_key,
            access_token,
            client: Client::builder().build()?,
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{table}", self.rest_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.access_token)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> RemoteResult<Vec<T>> {
        tracing::debug!(table, ?query, "GET");
        let response = self.request(Method::GET, table).query(query).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<Vec<T>>().await?)
    }

    async fn execute(&self, table: &str, request: RequestBuilder) -> RemoteResult<()> {
        let response = request.header("Prefer", "return=minimal").send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = parse_api_error(status, &body);
            tracing::warn!(table, %message, "Write rejected");
            return Err(RemoteError::Api(message));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: String,
    role: Option<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            role: Role::from_column(row.role.as_deref()),
            id: row.id,
        }
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl RemoteDataClient for SupabaseDataClient {
    async fn get_profile(&self, user_id: &str) -> RemoteResult<Option<UserProfile>> {
        let rows: Vec<ProfileRow> = self
            .fetch_rows(
                PROFILES,
                &[("select", "id,role".to_string()), ("id", eq(user_id))],
            )
            .await?;
        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn list_maintenances(&self, user_id: &str) -> RemoteResult<Vec<MaintenanceRecord>> {
        self.fetch_rows(
            MAINTENANCES,
            &[
                ("select", "*".to_string()),
                ("user_id", eq(user_id)),
                ("order", "date.desc".to_string()),
            ],
        )
        .await
    }

    async fn get_maintenance(
        &self,
        id: &MaintenanceId,
    ) -> RemoteResult<Option<MaintenanceRecord>> {
        let rows: Vec<MaintenanceRecord> = self
            .fetch_rows(MAINTENANCES, &[("select", "*".to_string()), ("id", eq(id))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn maintenances_by_ids(
        &self,
        ids: &[MaintenanceId],
    ) -> RemoteResult<Vec<MaintenanceRecord>> {
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.fetch_rows(
            MAINTENANCES,
            &[("select", "*".to_string()), ("id", format!("in.({joined})"))],
        )
        .await
    }

    async fn insert_maintenance(&self, record: &NewMaintenance) -> RemoteResult<()> {
        tracing::debug!(table = MAINTENANCES, "POST");
        let request = self.request(Method::POST, MAINTENANCES).json(record);
        self.execute(MAINTENANCES, request).await
    }

    async fn update_maintenance(
        &self,
        id: &MaintenanceId,
        fields: &MaintenanceFields,
    ) -> RemoteResult<()> {
        tracing::debug!(table = MAINTENANCES, %id, "PATCH");
        let request = self
            .request(Method::PATCH, MAINTENANCES)
            .query(&[("id", eq(id))])
            .json(fields);
        self.execute(MAINTENANCES, request).await
    }

    async fn delete_maintenance(&self, id: &MaintenanceId) -> RemoteResult<()> {
        tracing::debug!(table = MAINTENANCES, %id, "DELETE");
        let request = self
            .request(Method::DELETE, MAINTENANCES)
            .query(&[("id", eq(id))]);
        self.execute(MAINTENANCES, request).await
    }

    async fn list_favorites(&self, user_id: &str) -> RemoteResult<Vec<FavoriteMark>> {
        self.fetch_rows(
            FAVORITES,
            &[
                ("select", "user_id,maintenance_id".to_string()),
                ("user_id", eq(user_id)),
            ],
        )
        .await
    }

    async fn insert_favorite(
        &self,
        user_id: &str,
        maintenance_id: &MaintenanceId,
    ) -> RemoteResult<()> {
        tracing::debug!(table = FAVORITES, %maintenance_id, "POST");
        let request = self
            .request(Method::POST, FAVORITES)
            .json(&FavoriteMark::new(user_id, *maintenance_id));
        self.execute(FAVORITES, request).await
    }

    async fn delete_favorite(
        &self,
        user_id: &str,
        maintenance_id: &MaintenanceId,
    ) -> RemoteResult<()> {
        tracing::debug!(table = FAVORITES, %maintenance_id, "DELETE");
        let request = self.request(Method::DELETE, FAVORITES).query(&[
            ("user_id", eq(user_id)),
            ("maintenance_id", eq(maintenance_id)),
        ]);
        self.execute(FAVORITES, request).await
    }
}
