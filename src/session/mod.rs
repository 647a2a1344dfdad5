//! Server-side sessions for principals signed in through the identity
//! provider.

mod config;
mod signing;
mod memory_store;
mod repository;
mod secret;
mod token;

use chrono::{DateTime, Duration, Utc};
pub use config::{MIN_SECRET_LENGTH, SameSite, SessionConfig};
pub use signing::{
    find_session_cookie, removal_cookie, session_cookie, sign_session_id, verify_signed_cookie,
};
pub use memory_store::InMemorySessionRepository;
pub use repository::SessionRepository;
pub use secret::SessionSecret;
use serde::{Deserialize, Serialize};
pub use token::generate_token;

use crate::{AccessError, Principal};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub principal: Principal,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    /// A session starting now and lasting `lifetime`.
    pub fn new(principal: Principal, lifetime: Duration) -> Self {
        let created_at = Utc::now();
        Self {
            principal,
            created_at,
            expires_at: created_at + lifetime,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub data: SessionData,
}

impl Session {
    pub fn new(id: String, data: SessionData) -> Self {
        Self { id, data }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.data.expires_at
    }
}

/// The live principal behind a signed cookie value.
///
/// Forged values and unknown sessions give `None`. Expired sessions give
/// `None` and are destroyed.
pub async fn load_principal<S>(
    sessions: &S,
    secret: &SessionSecret,
    cookie_value: &str,
) -> Result<Option<Principal>, AccessError>
where
    S: SessionRepository + ?Sized,
{
    let Some(session_id) = verify_signed_cookie(cookie_value, secret) else {
        return Ok(None);
    };

    let Some(session) = sessions.find(&session_id).await? else {
        log::debug!(target: "dashgate::session", "msg=\"session not found\"");
        return Ok(None);
    };

    if session.is_expired() {
        log::debug!(
            target: "dashgate::session",
            "msg=\"session expired\" principal_id=\"{}\"",
            session.data.principal.id
        );
        sessions.destroy(&session_id).await?;
        return Ok(None);
    }

    Ok(Some(session.data.principal))
}
