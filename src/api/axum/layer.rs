//! The route guard as a tower layer.
//!
//! Wraps protected routes. Each request has its principal read by a
//! [`PrincipalSource`], resolved to an [`Identity`] and checked against
//! the route's requirement:
//!
//! | Outcome | Response |
//! |---------|----------|
//! | signed out | `303 See Other` to the login route, with `?next=<path>` |
//! | denied | `403` denial page linking to the fallback route (JSON for JSON clients) |
//! | undecidable (failed lookup) | `503` with `Retry-After: 1` |
//! | authorized | inner service, with the `Identity` in the request extensions |

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Json;
use axum::extract::Request;
use axum::http::header::{ACCEPT, RETRY_AFTER};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tower::{Layer, Service};

use super::error::AppError;
use super::principal::PrincipalSource;
use super::views::{denied_page, loading_page};
use crate::access::{AccessState, Identity, IdentityResolver};
use crate::api::ErrorResponse;
use crate::events::{AccessEvent, dispatch};
use crate::guard::{DeniedView, RouteGuard, RouteOutcome};
use crate::{AccessError, TeamMemberRepository};

/// Tower `Layer` applying a [`RouteGuard`] to every request.
#[derive(Clone)]
pub struct RequireAccessLayer<P, M> {
    source: Arc<P>,
    resolver: IdentityResolver<M>,
    guard: Arc<RouteGuard>,
}

impl<P, M> RequireAccessLayer<P, M> {
    pub fn new(source: Arc<P>, resolver: IdentityResolver<M>, guard: RouteGuard) -> Self {
        Self {
            source,
            resolver,
            guard: Arc::new(guard),
        }
    }
}

impl<P, M: Clone, S> Layer<S> for RequireAccessLayer<P, M> {
    type Service = RequireAccessService<P, M, S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireAccessService {
            inner,
            source: Arc::clone(&self.source),
            resolver: self.resolver.clone(),
            guard: Arc::clone(&self.guard),
        }
    }
}

/// Tower `Service` produced by [`RequireAccessLayer`].
#[derive(Clone)]
pub struct RequireAccessService<P, M, S> {
    inner: S,
    source: Arc<P>,
    resolver: IdentityResolver<M>,
    guard: Arc<RouteGuard>,
}

impl<P, M, S> Service<Request> for RequireAccessService<P, M, S>
where
    P: PrincipalSource,
    M: TeamMemberRepository + Clone + 'static,
    S: Service<Request, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let source = Arc::clone(&self.source);
        let resolver = self.resolver.clone();
        let guard = Arc::clone(&self.guard);

        Box::pin(async move {
            let principal = match source.principal(req.headers()).await {
                Ok(principal) => principal,
                Err(err) => return Ok(AppError(err).into_response()),
            };

            let identity = resolver.resolve(principal).await;
            if matches!(identity, Identity::LookupFailed { .. }) {
                return Ok(unavailable_response(req.headers()));
            }

            let state = AccessState::Resolved(identity);
            let principal_id = state.principal().map(|p| p.id.clone());

            match guard.outcome(&state) {
                RouteOutcome::Loading => Ok(unavailable_response(req.headers())),
                RouteOutcome::Unauthenticated { login_route } => {
                    let target = request_target(&req);
                    log::debug!(
                        target: "dashgate::access",
                        "msg=\"redirecting to login\" path=\"{target}\""
                    );
                    dispatch(AccessEvent::LoginRequired {
                        path: target.clone(),
                        at: Utc::now(),
                    })
                    .await;

                    Ok(Redirect::to(&login_location(&login_route, &target)).into_response())
                }
                RouteOutcome::Denied { fallback_route } => {
                    log::info!(
                        target: "dashgate::access",
                        "msg=\"access denied\" principal_id=\"{}\" path=\"{}\" requirement=\"{}\"",
                        principal_id.as_deref().unwrap_or("-"),
                        req.uri().path(),
                        guard.requirement()
                    );
                    dispatch(AccessEvent::AccessDenied {
                        principal_id: principal_id.unwrap_or_default(),
                        requirement: guard.requirement().to_string(),
                        at: Utc::now(),
                    })
                    .await;

                    Ok(denied_response(req.headers(), &DeniedView::new(fallback_route)))
                }
                RouteOutcome::Authorized => {
                    dispatch(AccessEvent::AccessGranted {
                        principal_id: principal_id.unwrap_or_default(),
                        requirement: guard.requirement().to_string(),
                        at: Utc::now(),
                    })
                    .await;

                    if let AccessState::Resolved(identity) = state {
                        req.extensions_mut().insert(identity);
                    }

                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
            }
        })
    }
}

fn request_target(req: &Request) -> String {
    req.uri()
        .path_and_query()
        .map_or_else(|| "/".to_owned(), |pq| pq.as_str().to_owned())
}

/// `login_route` with the original target appended as `next`.
pub fn login_location(login_route: &str, target: &str) -> String {
    let separator = if login_route.contains('?') { '&' } else { '?' };
    format!(
        "{login_route}{separator}next={}",
        utf8_percent_encode(target, NON_ALPHANUMERIC)
    )
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("application/json"))
}

fn denied_response(headers: &HeaderMap, view: &DeniedView) -> Response {
    if wants_json(headers) {
        let body = Json(ErrorResponse::from(AccessError::Forbidden));
        return (StatusCode::FORBIDDEN, body).into_response();
    }

    (StatusCode::FORBIDDEN, Html(denied_page(view))).into_response()
}

fn unavailable_response(headers: &HeaderMap) -> Response {
    if wants_json(headers) {
        return AppError(AccessError::LookupFailed("access not resolved".to_owned())).into_response();
    }

    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(RETRY_AFTER, "1")],
        Html(loading_page()),
    )
        .into_response()
}
