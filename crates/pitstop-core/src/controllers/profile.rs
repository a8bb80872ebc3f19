//! Profile screen: signed-in email and role.

use std::sync::Arc;

use super::SessionContext;
use crate::error::Result;
use crate::models::Role;
use crate::remote::RemoteDataClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub email: Option<String>,
    pub role: Role,
}

impl ProfileSummary {
    #[must_use]
    pub const fn role_label(&self) -> &'static str {
        self.role.label()
    }
}

pub struct ProfileController<C: RemoteDataClient> {
    client: Arc<C>,
    session: SessionContext,
}

impl<C: RemoteDataClient> ProfileController<C> {
    pub const fn new(client: Arc<C>, session: SessionContext) -> Self {
        Self { client, session }
    }

    /// A user without a readable `profiles` row is a regular user.
    pub async fn load(&self) -> Result<ProfileSummary> {
        let user_id = self.session.user_id()?;
        let role = match self.client.get_profile(user_id).await {
            Ok(profile) => profile.map(|profile| profile.role).unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, "Failed to read profile role; showing regular user");
                Role::default()
            }
        };

        Ok(ProfileSummary {
            email: self.session.user().and_then(|user| user.email.clone()),
            role,
        })
    }
}
