//! Remote data access against the backend tables.
//!
//! Controllers only see the `RemoteDataClient` trait; `SupabaseDataClient`
//! is the PostgREST-backed implementation.

mod supabase;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    FavoriteMark, MaintenanceFields, MaintenanceId, MaintenanceRecord, NewMaintenance,
    UserProfile,
};

pub use supabase::SupabaseDataClient;

/// Errors from the table API.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid data client configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The backend answered with an error status; the message is verbatim.
    #[error("{0}")]
    Api(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Authenticated CRUD calls against `maintenances`, `favorites` and `profiles`.
///
/// Each call is an independent request: no transactions and no ordering
/// between calls.
#[async_trait]
pub trait RemoteDataClient: Send + Sync {
    /// `profiles` row for the user, `None` when no row exists.
    async fn get_profile(&self, user_id: &str) -> RemoteResult<Option<UserProfile>>;

    /// All of the user's records, newest `date` first.
    async fn list_maintenances(&self, user_id: &str) -> RemoteResult<Vec<MaintenanceRecord>>;

    async fn get_maintenance(&self, id: &MaintenanceId)
        -> RemoteResult<Option<MaintenanceRecord>>;

    /// Batched lookup (`id IN ids`). Order follows the backend.
    async fn maintenances_by_ids(
        &self,
        ids: &[MaintenanceId],
    ) -> RemoteResult<Vec<MaintenanceRecord>>;

    async fn insert_maintenance(&self, record: &NewMaintenance) -> RemoteResult<()>;

    async fn update_maintenance(
        &self,
        id: &MaintenanceId,
        fields: &MaintenanceFields,
    ) -> RemoteResult<()>;

    async fn delete_maintenance(&self, id: &MaintenanceId) -> RemoteResult<()>;

    async fn list_favorites(&self, user_id: &str) -> RemoteResult<Vec<FavoriteMark>>;

    async fn insert_favorite(&self, user_id: &str, maintenance_id: &MaintenanceId)
        -> RemoteResult<()>;

    async fn delete_favorite(&self, user_id: &str, maintenance_id: &MaintenanceId)
        -> RemoteResult<()>;
}
