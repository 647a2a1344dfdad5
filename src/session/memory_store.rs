//! In-memory session storage.
//!
//! Suitable for development, testing and single-instance deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::repository::SessionRepository;
use super::token::generate_session_id;
use super::{Session, SessionData};
use crate::AccessError;

/// Sessions in a `HashMap` behind a `RwLock`, keyed by session ID.
///
/// Sessions are lost when the process restarts.
#[derive(Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of sessions currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned<T>(_: T) -> AccessError {
        AccessError::DatabaseError("Lock poisoned".to_owned())
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, data: SessionData) -> Result<String, AccessError> {
        let session_id = generate_session_id();

        self.sessions
            .write()
            .map_err(Self::poisoned)?
            .insert(session_id.clone(), data);

        Ok(session_id)
    }

    async fn find(&self, session_id: &str) -> Result<Option<Session>, AccessError> {
        let sessions = self.sessions.read().map_err(Self::poisoned)?;

        Ok(sessions.get(session_id).map(|data| Session {
            id: session_id.to_owned(),
            data: data.clone(),
        }))
    }

    async fn extend(
        &self,
        session_id: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<(), AccessError> {
        if let Some(data) = self
            .sessions
            .write()
            .map_err(Self::poisoned)?
            .get_mut(session_id)
        {
            data.expires_at = new_expires_at;
        }

        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> Result<(), AccessError> {
        self.sessions
            .write()
            .map_err(Self::poisoned)?
            .remove(session_id);

        Ok(())
    }

    async fn destroy_principal_sessions(&self, principal_id: &str) -> Result<(), AccessError> {
        self.sessions
            .write()
            .map_err(Self::poisoned)?
            .retain(|_, data| data.principal.id != principal_id);

        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn prune_expired(&self) -> Result<u64, AccessError> {
        let mut sessions = self.sessions.write().map_err(Self::poisoned)?;

        let now = Utc::now();
        let before_count = sessions.len();

        sessions.retain(|_, data| data.expires_at > now);

        let pruned = before_count.saturating_sub(sessions.len());
        Ok(u64::try_from(pruned).unwrap_or(u64::MAX))
    }
}
