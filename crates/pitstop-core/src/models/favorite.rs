//! Favorite mark model

use serde::{Deserialize, Serialize};

use super::MaintenanceId;

/// A user's bookmark on a maintenance record. Existence is the whole payload;
/// the backend keeps at most one mark per `(user_id, maintenance_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteMark {
    pub user_id: String,
    pub maintenance_id: MaintenanceId,
}

impl FavoriteMark {
    #[must_use]
    pub fn new(user_id: impl Into<String>, maintenance_id: MaintenanceId) -> Self {
        Self {
            user_id: user_id.into(),
            maintenance_id,
        }
    }
}
