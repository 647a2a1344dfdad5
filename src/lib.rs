//! Access control for the staff admin dashboard.
//!
//! `dashgate` decides what a signed-in staff member may see. A principal is
//! either *managed* (it has a [`TeamMember`] record carrying a role and an
//! explicit permission list) or *unmanaged* (no record, treated as a super
//! admin). Requirements are expressed as an [`AccessRequirement`] and
//! checked by [`evaluate`], either directly or through the two guard
//! surfaces in [`guard`].
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `axum_api` | Route guard layer, extractors and JSON routes (default) |
//! | `sqlx_sqlite` | `SQLite` team-member store |
//! | `tracing` | `tracing` spans on actions and stores, `TracingListener` |
//! | `mocks` | In-memory mock stores for tests |

pub mod access;
pub mod actions;
pub mod api;
pub mod config;
pub mod events;
pub mod guard;
mod principal;
pub mod session;
pub mod team;
pub mod validators;

#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;

use std::fmt;

pub use access::{
    AccessRequirement, AccessSession, AccessState, Decision, Identity, IdentityResolver, evaluate,
};
pub use config::{AccessConfig, CorsConfig, DashgateConfig, LookupFailurePolicy, RouteConfig};
pub use events::register_event_listeners;
pub use guard::{
    DeniedView, Navigator, Rendered, RouteGuard, RouteOutcome, RouteView, SubtreeGuard,
};
pub use principal::Principal;
pub use team::{
    CreateTeamMember, MemberStatus, Permission, PermissionSet, Role, TeamMember,
    TeamMemberRepository, UpdateTeamMember,
};

#[cfg(any(test, feature = "mocks"))]
pub use team::MockTeamMemberRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No principal is signed in.
    Unauthenticated,
    /// The principal is signed in but the requirement denies it.
    Forbidden,
    NotFound,
    /// A record with the same email or provider id exists.
    AlreadyExists,
    Validation(String),
    UnknownRole(String),
    UnknownPermission(String),
    UnknownStatus(String),
    /// The team-member store could not answer a lookup.
    LookupFailed(String),
    DatabaseError(String),
    ConfigurationError(String),
    Internal(String),
}

impl std::error::Error for AccessError {}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Authentication required"),
            Self::Forbidden => write!(f, "You do not have access to this resource"),
            Self::NotFound => write!(f, "Resource not found"),
            Self::AlreadyExists => write!(f, "This team member already exists"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::UnknownRole(role) => write!(f, "Unknown role: {role}"),
            Self::UnknownPermission(permission) => write!(f, "Unknown permission: {permission}"),
            Self::UnknownStatus(status) => write!(f, "Unknown member status: {status}"),
            Self::LookupFailed(msg) => write!(f, "Team member lookup failed: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AccessError::UnknownPermission("gem-coin".to_owned()).to_string(),
            "Unknown permission: gem-coin"
        );
        assert_eq!(
            AccessError::Forbidden.to_string(),
            "You do not have access to this resource"
        );
        assert_eq!(
            AccessError::AlreadyExists.to_string(),
            "This team member already exists"
        );
    }
}
