//! axum adapter: the route guard as a tower layer, plus JSON routes.

mod cors;
mod error;
mod extract;
mod handlers;
mod layer;
mod principal;
mod routes;
mod views;

pub use error::AppError;
pub use extract::CurrentIdentity;
pub use layer::{RequireAccessLayer, RequireAccessService, login_location};
pub use principal::{PrincipalSource, SessionCookieSource};
pub use routes::{AppState, access_routes, router, team_member_routes};
pub use views::{denied_page, loading_page};
