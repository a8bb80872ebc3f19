//! Error types for pitstop-core

use thiserror::Error;

/// Result type alias using pitstop-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the screen controllers.
///
/// Every variant is terminal for the action that produced it. Backend messages
/// are carried verbatim so they can be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No authenticated session
    #[error("User is not authenticated.")]
    Unauthenticated,

    /// Missing or mismatched required fields, checked before any network call
    #[error("{0}")]
    Validation(String),

    /// A read against the backend failed
    #[error("Failed to load: {0}")]
    LoadFailed(String),

    /// An insert or update against the backend failed
    #[error("Failed to save: {0}")]
    SubmitFailed(String),

    /// A delete against the backend failed
    #[error("Failed to delete: {0}")]
    DeleteFailed(String),

    /// Sign-out was rejected
    #[error("Failed to sign out: {0}")]
    SignOutFailed(String),

    /// Sign-in was rejected
    #[error("{0}")]
    InvalidCredentials(String),

    /// Single-entity lookup returned no row
    #[error("Maintenance not found: {0}")]
    NotFound(String),

    /// The controller was deactivated before the response arrived
    #[error("Response discarded because the screen is no longer active")]
    Stale,
}
