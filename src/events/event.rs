use chrono::{DateTime, Utc};

use crate::{LookupFailurePolicy, Role};

/// Access events emitted by dashgate actions and guards.
///
/// Events are always fired. If no listeners are registered they are
/// dropped. Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum AccessEvent {
    // session
    SignedIn {
        principal_id: String,
        email: String,
        at: DateTime<Utc>,
    },
    SignedOut {
        principal_id: String,
        at: DateTime<Utc>,
    },

    // identity resolution
    IdentityResolved {
        principal_id: String,
        managed: bool,
        role: Option<Role>,
        at: DateTime<Utc>,
    },
    LookupFailed {
        principal_id: String,
        reason: String,
        policy: LookupFailurePolicy,
        at: DateTime<Utc>,
    },

    // guards
    AccessGranted {
        principal_id: String,
        requirement: String,
        at: DateTime<Utc>,
    },
    AccessDenied {
        principal_id: String,
        requirement: String,
        at: DateTime<Utc>,
    },
    LoginRequired {
        path: String,
        at: DateTime<Utc>,
    },
}

impl AccessEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignedIn { .. } => "session.signed_in",
            Self::SignedOut { .. } => "session.signed_out",
            Self::IdentityResolved { .. } => "identity.resolved",
            Self::LookupFailed { .. } => "identity.lookup_failed",
            Self::AccessGranted { .. } => "access.granted",
            Self::AccessDenied { .. } => "access.denied",
            Self::LoginRequired { .. } => "access.login_required",
        }
    }

    /// Returns when the event happened.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SignedIn { at, .. }
            | Self::SignedOut { at, .. }
            | Self::IdentityResolved { at, .. }
            | Self::LookupFailed { at, .. }
            | Self::AccessGranted { at, .. }
            | Self::AccessDenied { at, .. }
            | Self::LoginRequired { at, .. } => *at,
        }
    }

    /// The principal involved, if any.
    pub fn principal_id(&self) -> Option<&str> {
        match self {
            Self::SignedIn { principal_id, .. }
            | Self::SignedOut { principal_id, .. }
            | Self::IdentityResolved { principal_id, .. }
            | Self::LookupFailed { principal_id, .. }
            | Self::AccessGranted { principal_id, .. }
            | Self::AccessDenied { principal_id, .. } => Some(principal_id),
            Self::LoginRequired { .. } => None,
        }
    }
}
