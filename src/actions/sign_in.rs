use chrono::{DateTime, Utc};

use crate::events::{AccessEvent, dispatch};
use crate::session::{SessionConfig, SessionData, SessionRepository, sign_session_id};
use crate::{AccessError, Principal};

/// A freshly created session and the cookie value that carries it.
#[derive(Debug, Clone)]
pub struct SignedSession {
    pub session_id: String,
    /// Signed value for the session cookie.
    pub cookie_value: String,
    pub expires_at: DateTime<Utc>,
}

/// Starts a dashboard session for a principal the identity provider has
/// already authenticated.
pub struct SignInAction<S: SessionRepository> {
    sessions: S,
    config: SessionConfig,
}

impl<S: SessionRepository> SignInAction<S> {
    pub fn new(sessions: S, config: SessionConfig) -> Self {
        Self { sessions, config }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sign_in", skip_all, fields(principal_id = %principal.id), err)
    )]
    pub async fn execute(&self, principal: Principal) -> Result<SignedSession, AccessError> {
        self.config.validate()?;

        if principal.id.trim().is_empty() {
            return Err(AccessError::Validation(
                "principal id cannot be empty".to_owned(),
            ));
        }

        let data = SessionData::new(principal, self.config.session_lifetime);
        let expires_at = data.expires_at;
        let principal_id = data.principal.id.clone();
        let email = data.principal.email.clone();

        let session_id = self.sessions.create(data).await?;
        let cookie_value = sign_session_id(&session_id, &self.config.secret_key)?;

        log::info!(
            target: "dashgate::session",
            "msg=\"signed in\" principal_id=\"{principal_id}\" expires_at=\"{expires_at}\""
        );

        dispatch(AccessEvent::SignedIn {
            principal_id,
            email,
            at: Utc::now(),
        })
        .await;

        Ok(SignedSession {
            session_id,
            cookie_value,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{InMemorySessionRepository, SessionSecret, verify_signed_cookie};

    fn config() -> SessionConfig {
        SessionConfig {
            secret_key: SessionSecret::new("test-secret-key-that-is-long-enough"),
            ..SessionConfig::default()
        }
    }

    #[tokio::test]
    async fn test_sign_in_creates_session() {
        let sessions = InMemorySessionRepository::new();
        let action = SignInAction::new(sessions.clone(), config());

        let signed = action
            .execute(Principal::mock_from_email("ops@example.com"))
            .await
            .unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(
            verify_signed_cookie(&signed.cookie_value, &config().secret_key),
            Some(signed.session_id.clone())
        );

        let session = sessions.find(&signed.session_id).await.unwrap().unwrap();
        assert_eq!(session.data.principal.id, "uid-ops");
        assert_eq!(session.data.expires_at, signed.expires_at);
    }

    #[tokio::test]
    async fn test_sign_in_rejects_blank_principal() {
        let sessions = InMemorySessionRepository::new();
        let action = SignInAction::new(sessions.clone(), config());

        let result = action.execute(Principal::new(" ", "ops@example.com")).await;

        assert!(matches!(result, Err(AccessError::Validation(_))));
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_requires_secret() {
        let sessions = InMemorySessionRepository::new();
        let action = SignInAction::new(sessions.clone(), SessionConfig::default());

        let result = action
            .execute(Principal::mock_from_email("ops@example.com"))
            .await;

        assert!(matches!(result, Err(AccessError::ConfigurationError(_))));
        assert!(sessions.is_empty());
    }
}
