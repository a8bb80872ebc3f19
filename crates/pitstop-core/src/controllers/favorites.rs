//! Favorites screen: the user's marked records.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Activation, SessionContext};
use crate::error::{Error, Result};
use crate::models::{MaintenanceId, MaintenanceRecord};
use crate::remote::RemoteDataClient;

pub struct FavoritesController<C: RemoteDataClient> {
    client: Arc<C>,
    session: SessionContext,
    activation: Activation,
    favorites: RwLock<Vec<MaintenanceRecord>>,
}

impl<C: RemoteDataClient> FavoritesController<C> {
    pub fn new(client: Arc<C>, session: SessionContext) -> Self {
        Self {
            client,
            session,
            activation: Activation::default(),
            favorites: RwLock::new(Vec::new()),
        }
    }

    /// Resolve the user's favorite marks to records.
    ///
    /// With no marks the second lookup is skipped entirely.
    pub async fn load(&self) -> Result<Vec<MaintenanceRecord>> {
        let user_id = self.session.user_id()?;
        let ticket = self.activation.begin();

        let marks = self
            .client
            .list_favorites(user_id)
            .await
            .map_err(|error| Error::LoadFailed(error.to_string()))?;
        let ids = marks
            .into_iter()
            .map(|mark| mark.maintenance_id)
            .collect::<Vec<MaintenanceId>>();

        let records = if ids.is_empty() {
            Vec::new()
        } else {
            self.client
                .maintenances_by_ids(&ids)
                .await
                .map_err(|error| Error::LoadFailed(error.to_string()))?
        };
        self.activation.check(ticket)?;

        self.favorites.write().await.clone_from(&records);
        Ok(records)
    }

    pub async fn favorites(&self) -> Vec<MaintenanceRecord> {
        self.favorites.read().await.clone()
    }

    pub fn deactivate(&self) {
        self.activation.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::auth::AuthUser;
    use crate::controllers::fake::{record, FakeRemote, Op};

    fn session() -> SessionContext {
        SessionContext::signed_in(AuthUser {
            id: "user-1".to_string(),
            email: None,
        })
    }

    #[tokio::test]
    async fn no_marks_short_circuits_second_lookup() {
        let remote = FakeRemote::new();
        remote.add_record(record("user-1", "Oil Change", "2024-01-01", 1000.0));
        let controller = FavoritesController::new(remote.clone(), session());

        let favorites = controller.load().await.unwrap();

        assert!(favorites.is_empty());
        assert_eq!(remote.count(Op::ListFavorites), 1);
        assert_eq!(remote.count(Op::MaintenancesByIds), 0);
    }

    #[tokio::test]
    async fn resolves_the_single_marked_record() {
        let remote = FakeRemote::new();
        let marked = remote.add_record(record("user-1", "Oil Change", "2024-03-05", 12000.0));
        remote.add_record(record("user-1", "Wipers", "2024-04-01", 13000.0));
        remote.add_favorite("user-1", marked);
        let controller = FavoritesController::new(remote.clone(), session());

        let favorites = controller.load().await.unwrap();

        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, marked);
        assert_eq!(favorites[0].title, "Oil Change");
        assert_eq!(favorites[0].date, "2024-03-05");
        assert_eq!(favorites[0].mileage, 12000.0);
        assert_eq!(remote.count(Op::MaintenancesByIds), 1);
        assert_eq!(controller.favorites().await, favorites);
    }

    #[tokio::test]
    async fn errors_surface_as_load_failed() {
        let remote = FakeRemote::new();
        let marked = remote.add_record(record("user-1", "Oil Change", "2024-03-05", 12000.0));
        remote.add_favorite("user-1", marked);
        remote.fail(Op::MaintenancesByIds);
        let controller = FavoritesController::new(remote.clone(), session());

        assert!(matches!(
            controller.load().await,
            Err(Error::LoadFailed(message)) if message.contains("rejected")
        ));

        remote.fail(Op::ListFavorites);
        assert!(matches!(controller.load().await, Err(Error::LoadFailed(_))));
    }

    #[tokio::test]
    async fn requires_session() {
        let remote = FakeRemote::new();
        let controller = FavoritesController::new(remote.clone(), SessionContext::anonymous());
        assert_eq!(controller.load().await, Err(Error::Unauthenticated));
        assert!(remote.calls().is_empty());
    }
}
