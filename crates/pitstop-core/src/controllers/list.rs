//! Maintenance list screen: records, favorite markers, search, and the admin flag.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Activation, SessionContext};
use crate::error::{Error, Result};
use crate::models::{MaintenanceId, MaintenanceRecord};
use crate::remote::RemoteDataClient;

/// What the list screen shows after a load. `loaded == false` is the idle state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSnapshot {
    pub loaded: bool,
    pub records: Vec<MaintenanceRecord>,
    pub favorite_ids: Vec<MaintenanceId>,
    pub is_admin: bool,
}

impl ListSnapshot {
    #[must_use]
    pub fn is_favorite(&self, id: &MaintenanceId) -> bool {
        self.favorite_ids.contains(id)
    }
}

pub struct MaintenanceListController<C: RemoteDataClient> {
    client: Arc<C>,
    session: SessionContext,
    activation: Activation,
    state: RwLock<ListSnapshot>,
}

impl<C: RemoteDataClient> MaintenanceListController<C> {
    pub fn new(client: Arc<C>, session: SessionContext) -> Self {
        Self {
            client,
            session,
            activation: Activation::default(),
            state: RwLock::new(ListSnapshot::default()),
        }
    }

    /// Fetch the profile role, the records (newest first) and the favorite
    /// ids. Runs on every activation. On any failure the previous snapshot is
    /// kept as-is.
    pub async fn load(&self) -> Result<ListSnapshot> {
        let user_id = self.session.user_id()?;
        let ticket = self.activation.begin();

        let (profile, records, favorites) = tokio::try_join!(
            self.client.get_profile(user_id),
            self.client.list_maintenances(user_id),
            self.client.list_favorites(user_id),
        )
        .map_err(|error| {
            tracing::warn!(%error, "Failed to load maintenances or favorites");
            Error::LoadFailed(error.to_string())
        })?;
        self.activation.check(ticket)?;

        let snapshot = ListSnapshot {
            loaded: true,
            records,
            favorite_ids: favorites
                .into_iter()
                .map(|mark| mark.maintenance_id)
                .collect(),
            is_admin: profile.is_some_and(|profile| profile.role.is_admin()),
        };
        tracing::debug!(
            records = snapshot.records.len(),
            favorites = snapshot.favorite_ids.len(),
            "Maintenance list loaded"
        );
        let mut state = self.state.write().await;
        state.clone_from(&snapshot);
        Ok(snapshot)
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        self.state.read().await.clone()
    }

    /// Records whose title contains `query`, ignoring case.
    pub async fn filter(&self, query: &str) -> Vec<MaintenanceRecord> {
        filter_by_title(&self.state.read().await.records, query)
    }

    pub async fn is_favorite(&self, id: &MaintenanceId) -> bool {
        self.state.read().await.is_favorite(id)
    }

    pub async fn is_admin(&self) -> bool {
        self.state.read().await.is_admin
    }

    /// Flip the favorite mark for `id`. Local state changes only after the
    /// backend accepts the write, and only if the screen is still active.
    /// Returns whether the record is now a favorite.
    pub async fn toggle_favorite(&self, id: &MaintenanceId) -> Result<bool> {
        let user_id = self.session.user_id()?;
        let ticket = self.activation.current();
        let favorited = self.is_favorite(id).await;

        if favorited {
            self.client
                .delete_favorite(user_id, id)
                .await
                .map_err(|error| Error::DeleteFailed(error.to_string()))?;
        } else {
            self.client
                .insert_favorite(user_id, id)
                .await
                .map_err(|error| Error::SubmitFailed(error.to_string()))?;
        }

        if !self.activation.is_current(ticket) {
            tracing::debug!(%id, "Favorite toggled after deactivation; next load picks it up");
            return Ok(!favorited);
        }

        let mut state = self.state.write().await;
        if favorited {
            state.favorite_ids.retain(|favorite| favorite != id);
        } else if !state.favorite_ids.contains(id) {
            state.favorite_ids.push(*id);
        }
        Ok(!favorited)
    }

    /// The screen lost focus; responses still in flight are discarded.
    pub fn deactivate(&self) {
        self.activation.invalidate();
    }
}

/// Case-insensitive substring match on titles. An empty query keeps everything.
#[must_use]
pub fn filter_by_title(records: &[MaintenanceRecord], query: &str) -> Vec<MaintenanceRecord> {
    records
        .iter()
        .filter(|record| record.title_matches(query))
        .cloned()
        .collect()
}
