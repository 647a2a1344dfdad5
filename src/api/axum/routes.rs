use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use super::cors;
use super::handlers;
use super::layer::RequireAccessLayer;
use super::principal::SessionCookieSource;
use crate::access::{AccessRequirement, IdentityResolver};
use crate::session::SessionRepository;
use crate::{AccessError, DashgateConfig, Permission, RouteGuard, TeamMemberRepository};

#[derive(Clone)]
pub struct AppState<M, S> {
    pub members: M,
    pub sessions: S,
    pub config: Arc<DashgateConfig>,
}

impl<M, S> AppState<M, S>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    /// Fails with [`AccessError::ConfigurationError`] when the session
    /// settings cannot sign cookies.
    pub fn new(members: M, sessions: S, config: DashgateConfig) -> Result<Self, AccessError> {
        config.session.validate()?;

        Ok(Self {
            members,
            sessions,
            config: Arc::new(config),
        })
    }

    pub fn resolver(&self) -> IdentityResolver<M> {
        IdentityResolver::new(self.members.clone(), self.config.access.clone())
    }

    pub fn principal_source(&self) -> SessionCookieSource<S> {
        SessionCookieSource::new(self.sessions.clone(), self.config.session.clone())
    }

    /// A route guard for `requirement`, as a layer.
    ///
    /// ```rust,ignore
    /// let gem_coins = Router::new()
    ///     .route("/gem-coins", get(gem_coins_page))
    ///     .route_layer(state.require(AccessRequirement::permission(Permission::GemCoins)));
    /// ```
    pub fn require(
        &self,
        requirement: AccessRequirement,
    ) -> RequireAccessLayer<SessionCookieSource<S>, M> {
        RequireAccessLayer::new(
            Arc::new(self.principal_source()),
            self.resolver(),
            RouteGuard::new(requirement, self.config.routes.clone()),
        )
    }
}

/// Every dashgate route: access endpoints and team management.
///
/// Adds the CORS layer when `config.cors.allowed_origins` is not empty.
pub fn router<M, S>(state: AppState<M, S>) -> Router
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let allowed_origins = state.config.cors.allowed_origins.clone();

    let router = Router::new()
        .merge(access_routes())
        .merge(team_member_routes(&state))
        .with_state(state);

    if allowed_origins.is_empty() {
        router
    } else {
        router.layer(cors::dashboard(&allowed_origins))
    }
}

/// Endpoints any visitor can call; they answer for whoever is signed in.
pub fn access_routes<M, S>() -> Router<AppState<M, S>>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    Router::new()
        .route("/me/access", get(handlers::my_access::<M, S>))
        .route("/me/access/check", post(handlers::check_access::<M, S>))
        .route("/session/logout", post(handlers::logout::<M, S>))
}

/// Team-member management, guarded by [`Permission::Teams`].
pub fn team_member_routes<M, S>(state: &AppState<M, S>) -> Router<AppState<M, S>>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    Router::new()
        .route(
            "/team-members",
            get(handlers::list_team_members::<M, S>).post(handlers::create_team_member::<M, S>),
        )
        .route(
            "/team-members/{id}",
            get(handlers::get_team_member::<M, S>)
                .patch(handlers::update_team_member::<M, S>)
                .delete(handlers::delete_team_member::<M, S>),
        )
        .route_layer(state.require(AccessRequirement::permission(Permission::Teams)))
}
