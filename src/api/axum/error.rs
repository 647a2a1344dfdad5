use axum::Json;
use axum::http::StatusCode;
use axum::http::header::RETRY_AFTER;
use axum::response::{IntoResponse, Response};

use crate::AccessError;
use crate::api::ErrorResponse;

/// Converts `AccessError` into HTTP responses.
#[derive(Debug)]
pub struct AppError(pub AccessError);

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        Self(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AccessError::Validation(_)
            | AccessError::UnknownRole(_)
            | AccessError::UnknownPermission(_)
            | AccessError::UnknownStatus(_) => StatusCode::BAD_REQUEST,
            AccessError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AccessError::Forbidden => StatusCode::FORBIDDEN,
            AccessError::NotFound => StatusCode::NOT_FOUND,
            AccessError::AlreadyExists => StatusCode::CONFLICT,
            AccessError::LookupFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            AccessError::DatabaseError(_)
            | AccessError::ConfigurationError(_)
            | AccessError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!(
                target: "dashgate",
                "msg=\"request failed\" status={} error=\"{}\"",
                status.as_u16(),
                self.0
            );
        }

        let body = Json(ErrorResponse::from(self.0));
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return (status, [(RETRY_AFTER, "1")], body).into_response();
        }

        (status, body).into_response()
    }
}
