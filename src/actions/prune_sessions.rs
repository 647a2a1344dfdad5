//! Run periodically to drop expired sessions from the store.

use crate::AccessError;
use crate::session::SessionRepository;

pub struct PruneExpiredSessionsAction<S: SessionRepository> {
    sessions: S,
}

impl<S: SessionRepository> PruneExpiredSessionsAction<S> {
    pub fn new(sessions: S) -> Self {
        Self { sessions }
    }

    /// Returns how many sessions were removed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), name = "prune_expired_sessions")
    )]
    pub async fn execute(&self) -> Result<u64, AccessError> {
        let pruned = self.sessions.prune_expired().await?;

        log::info!(
            target: "dashgate::session",
            "msg=\"pruned expired sessions\" count={pruned}"
        );

        Ok(pruned)
    }
}
