use crate::access::{AccessRequirement, AccessState, Decision, evaluate};
use crate::config::RouteConfig;

/// Performs client-side navigation for the route guard.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

/// Where a guarded page stands.
///
/// `Loading` moves to exactly one of the other states once identity
/// resolution finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Loading,
    Unauthenticated { login_route: String },
    Authorized,
    Denied { fallback_route: String },
}

impl RouteOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// The static view shown to signed-in principals lacking access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeniedView {
    pub title: &'static str,
    pub message: &'static str,
    pub button_label: &'static str,
    pub fallback_route: String,
}

impl DeniedView {
    pub const TITLE: &'static str = "Access Denied";
    pub const MESSAGE: &'static str = "You don't have permission to access this page.";
    pub const BUTTON_LABEL: &'static str = "Go to Dashboard";

    pub fn new(fallback_route: impl Into<String>) -> Self {
        Self {
            title: Self::TITLE,
            message: Self::MESSAGE,
            button_label: Self::BUTTON_LABEL,
            fallback_route: fallback_route.into(),
        }
    }

    /// The button: navigates to the fallback route.
    pub fn go_back(&self, navigator: &dyn Navigator) {
        navigator.navigate(&self.fallback_route);
    }
}

/// What the page renders for a given outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteView<T> {
    Spinner,
    /// Rendered while the login redirect is in progress.
    Nothing,
    Page(T),
    Denied(DeniedView),
}

/// Protects a whole page.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    requirement: AccessRequirement,
    routes: RouteConfig,
}

impl RouteGuard {
    pub fn new(requirement: AccessRequirement, routes: RouteConfig) -> Self {
        Self {
            requirement,
            routes,
        }
    }

    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    pub fn outcome(&self, state: &AccessState) -> RouteOutcome {
        let Some(identity) = state.identity() else {
            return RouteOutcome::Loading;
        };

        if !identity.is_authenticated() {
            return RouteOutcome::Unauthenticated {
                login_route: self.routes.login_route.clone(),
            };
        }

        match evaluate(&self.requirement, state) {
            Decision::Allow => RouteOutcome::Authorized,
            Decision::Deny => RouteOutcome::Denied {
                fallback_route: self.routes.fallback_route.clone(),
            },
            Decision::Indeterminate => RouteOutcome::Loading,
        }
    }

    /// Computes the outcome and performs its side effect. Signed-out
    /// visitors are navigated to the login route; nothing else navigates.
    pub fn apply<T>(
        &self,
        state: &AccessState,
        navigator: &dyn Navigator,
        children: impl FnOnce() -> T,
    ) -> RouteView<T> {
        match self.outcome(state) {
            RouteOutcome::Loading => RouteView::Spinner,
            RouteOutcome::Unauthenticated { login_route } => {
                log::debug!(
                    target: "dashgate::access",
                    "msg=\"redirecting to login\" login_route=\"{login_route}\""
                );
                navigator.navigate(&login_route);
                RouteView::Nothing
            }
            RouteOutcome::Authorized => RouteView::Page(children()),
            RouteOutcome::Denied { fallback_route } => {
                log::debug!(
                    target: "dashgate::access",
                    "msg=\"route denied\" principal_id=\"{}\" requirement=\"{}\"",
                    state.principal().map_or("-", |p| p.id.as_str()),
                    self.requirement
                );
                RouteView::Denied(DeniedView::new(fallback_route))
            }
        }
    }
}
