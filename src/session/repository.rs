//! Session repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Session, SessionData};
use crate::AccessError;

/// Server-side session storage.
///
/// [`InMemorySessionRepository`](super::InMemorySessionRepository) is the
/// bundled implementation.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Creates a new session and returns the session ID.
    async fn create(&self, data: SessionData) -> Result<String, AccessError>;

    async fn find(&self, session_id: &str) -> Result<Option<Session>, AccessError>;

    /// Moves a session's expiry (sliding window).
    async fn extend(
        &self,
        session_id: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<(), AccessError>;

    async fn destroy(&self, session_id: &str) -> Result<(), AccessError>;

    /// Destroys every session of one principal.
    async fn destroy_principal_sessions(&self, principal_id: &str) -> Result<(), AccessError>;

    /// Removes expired sessions and returns how many were removed.
    async fn prune_expired(&self) -> Result<u64, AccessError>;
}

#[async_trait]
impl<T: SessionRepository + ?Sized> SessionRepository for std::sync::Arc<T> {
    async fn create(&self, data: SessionData) -> Result<String, AccessError> {
        (**self).create(data).await
    }

    async fn find(&self, session_id: &str) -> Result<Option<Session>, AccessError> {
        (**self).find(session_id).await
    }

    async fn extend(
        &self,
        session_id: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<(), AccessError> {
        (**self).extend(session_id, new_expires_at).await
    }

    async fn destroy(&self, session_id: &str) -> Result<(), AccessError> {
        (**self).destroy(session_id).await
    }

    async fn destroy_principal_sessions(&self, principal_id: &str) -> Result<(), AccessError> {
        (**self).destroy_principal_sessions(principal_id).await
    }

    async fn prune_expired(&self) -> Result<u64, AccessError> {
        (**self).prune_expired().await
    }
}
