use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::AppError;
use crate::{AccessError, Identity};

/// The identity admitted by [`RequireAccessLayer`](super::RequireAccessLayer).
///
/// Only available on routes behind the layer; elsewhere the extractor
/// rejects with `401`.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl CurrentIdentity {
    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Self)
            .ok_or(AppError(AccessError::Unauthenticated))
    }
}
