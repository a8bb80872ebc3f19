//! Screen controllers.
//!
//! Each controller is built with the shared `RemoteDataClient` handle and an
//! explicit `SessionContext`; none of them looks the current user up on its
//! own. Every operation is one or more request/response round trips whose
//! result is merged or filtered in memory.

mod auth;
mod detail;
mod favorites;
mod form;
mod list;
mod profile;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::auth::{AuthSession, AuthUser};
use crate::error::{Error, Result};

pub use auth::{AuthController, SignupNotice};
pub use detail::{DetailRow, MaintenanceDetail, MaintenanceDetailController, PendingDelete};
pub use favorites::FavoritesController;
pub use form::{
    coerce_number, CreateMaintenanceController, EditMaintenanceController, MaintenanceForm,
};
pub use list::{filter_by_title, ListSnapshot, MaintenanceListController};
pub use profile::{ProfileController, ProfileSummary};

/// Where the app should go after an action succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The authenticated root: the maintenance list.
    MaintenanceList,
    Login,
    /// Pop back to whatever screen opened the current one.
    Back,
}

/// The session a controller acts for, passed in at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    user: Option<AuthUser>,
}

impl SessionContext {
    #[must_use]
    pub const fn signed_in(user: AuthUser) -> Self {
        Self { user: Some(user) }
    }

    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Current user id, or `Unauthenticated`.
    pub fn user_id(&self) -> Result<&str> {
        self.user
            .as_ref()
            .map(|user| user.id.as_str())
            .ok_or(Error::Unauthenticated)
    }
}

impl From<Option<AuthSession>> for SessionContext {
    fn from(session: Option<AuthSession>) -> Self {
        Self {
            user: session.map(|session| session.user),
        }
    }
}

/// Generation counter that lets a controller drop responses for requests
/// issued before it was deactivated (or before a newer activation).
#[derive(Debug, Default)]
pub(crate) struct Activation {
    generation: AtomicU64,
}

impl Activation {
    /// Start a new activation and return its ticket.
    pub(crate) fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Ticket for requests issued within the current activation.
    pub(crate) fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub(crate) fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.current() == ticket
    }

    pub(crate) fn check(&self, ticket: u64) -> Result<()> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            tracing::warn!(ticket, current = self.current(), "Dropping stale response");
            Err(Error::Stale)
        }
    }
}
