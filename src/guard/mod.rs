//! Guards wrapping protected content.
//!
//! [`SubtreeGuard`] decides whether a fragment of a page is shown.
//! [`RouteGuard`] protects a whole page and adds the sign-in precondition:
//! signed-out visitors are sent to the login route, signed-in visitors
//! lacking access get a static denial view and stay put.

mod route;
mod subtree;

pub use route::{DeniedView, Navigator, RouteGuard, RouteOutcome, RouteView};
pub use subtree::{Rendered, SubtreeGuard};
