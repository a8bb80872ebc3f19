//! Login, signup and logout over the session API.

use std::sync::Arc;

use super::Route;
use crate::auth::{AuthSession, SessionApi, SignUpOutcome};
use crate::error::{Error, Result};

const EMPTY_FIELDS_MESSAGE: &str = "Fill in all fields.";
const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";
const CONFIRMATION_MESSAGE: &str =
    "Account created. Confirm your email address before signing in.";

/// Shown after a successful signup; the app then moves to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupNotice {
    pub message: &'static str,
    pub next: Route,
}

pub struct AuthController<A: SessionApi> {
    api: Arc<A>,
}

impl<A: SessionApi> AuthController<A> {
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Sign in. The backend's rejection message is passed through unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<(AuthSession, Route)> {
        let session = self
            .api
            .sign_in(email.trim(), password)
            .await
            .map_err(|error| {
                tracing::warn!(%error, "Sign in rejected");
                Error::InvalidCredentials(error.to_string())
            })?;
        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok((session, Route::MaintenanceList))
    }

    /// Register a new account. Fields are checked locally before any request.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<SignupNotice> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() || confirm_password.is_empty() {
            return Err(Error::Validation(EMPTY_FIELDS_MESSAGE.to_string()));
        }
        if password != confirm_password {
            return Err(Error::Validation(PASSWORD_MISMATCH_MESSAGE.to_string()));
        }

        let outcome = self
            .api
            .sign_up(email, password)
            .await
            .map_err(|error| Error::SubmitFailed(error.to_string()))?;
        if matches!(outcome, SignUpOutcome::SignedIn(_)) {
            tracing::debug!("Sign up returned a session; still routing to login");
        }
        tracing::info!(email, "Account registered");
        Ok(SignupNotice {
            message: CONFIRMATION_MESSAGE,
            next: Route::Login,
        })
    }

    pub async fn logout(&self) -> Result<Route> {
        self.api
            .sign_out()
            .await
            .map_err(|error| Error::SignOutFailed(error.to_string()))?;
        tracing::info!("Signed out");
        Ok(Route::Login)
    }
}
