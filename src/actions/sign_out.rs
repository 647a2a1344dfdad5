use chrono::Utc;

use crate::events::{AccessEvent, dispatch};
use crate::session::{SessionRepository, SessionSecret, verify_signed_cookie};
use crate::{AccessError, Principal};

/// Ends a dashboard session.
pub struct SignOutAction<S: SessionRepository> {
    sessions: S,
    secret: SessionSecret,
}

impl<S: SessionRepository> SignOutAction<S> {
    pub fn new(sessions: S, secret: SessionSecret) -> Self {
        Self { sessions, secret }
    }

    /// Destroys the session behind `cookie_value`.
    ///
    /// Returns the principal that was signed out, or `None` when the cookie
    /// did not point at a live session. Signing out twice is not an error.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "sign_out", skip_all, err))]
    pub async fn execute(&self, cookie_value: &str) -> Result<Option<Principal>, AccessError> {
        let Some(session_id) = verify_signed_cookie(cookie_value, &self.secret) else {
            return Ok(None);
        };

        let session = self.sessions.find(&session_id).await?;
        self.sessions.destroy(&session_id).await?;

        let Some(session) = session else {
            return Ok(None);
        };
        let principal = session.data.principal;

        log::info!(
            target: "dashgate::session",
            "msg=\"signed out\" principal_id=\"{}\"",
            principal.id
        );

        dispatch(AccessEvent::SignedOut {
            principal_id: principal.id.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(Some(principal))
    }

    /// Destroys every session of `principal_id`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sign_out_everywhere", skip(self), err)
    )]
    pub async fn execute_everywhere(&self, principal_id: &str) -> Result<(), AccessError> {
        self.sessions.destroy_principal_sessions(principal_id).await?;

        log::info!(
            target: "dashgate::session",
            "msg=\"signed out everywhere\" principal_id=\"{principal_id}\""
        );

        dispatch(AccessEvent::SignedOut {
            principal_id: principal_id.to_owned(),
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}
