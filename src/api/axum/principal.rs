use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use crate::session::{SessionConfig, SessionRepository, find_session_cookie, load_principal};
use crate::{AccessError, Principal};

/// Where the signed-in principal of a request comes from.
#[async_trait]
pub trait PrincipalSource: Send + Sync + 'static {
    /// `Ok(None)` when nobody is signed in.
    async fn principal(&self, headers: &HeaderMap) -> Result<Option<Principal>, AccessError>;
}

/// Reads the signed session cookie and loads its session.
#[derive(Clone)]
pub struct SessionCookieSource<S> {
    sessions: S,
    config: SessionConfig,
}

impl<S: SessionRepository> SessionCookieSource<S> {
    pub fn new(sessions: S, config: SessionConfig) -> Self {
        Self { sessions, config }
    }

    pub fn cookie_value(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| find_session_cookie(header, &self.config.cookie_name))
    }
}

#[async_trait]
impl<S> PrincipalSource for SessionCookieSource<S>
where
    S: SessionRepository + 'static,
{
    async fn principal(&self, headers: &HeaderMap) -> Result<Option<Principal>, AccessError> {
        match self.cookie_value(headers) {
            Some(value) => load_principal(&self.sessions, &self.config.secret_key, &value).await,
            None => Ok(None),
        }
    }
}
