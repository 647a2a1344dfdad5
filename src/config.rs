//! Configuration types for dashgate.
//!
//! # Example
//!
//! ```rust
//! use dashgate::config::{AccessConfig, DashgateConfig, LookupFailurePolicy};
//! use dashgate::session::SessionSecret;
//! use std::time::Duration;
//!
//! // Production preset; the secret is required
//! let config = DashgateConfig::strict(SessionSecret::new("a-secret-that-is-at-least-32-bytes"));
//! assert_eq!(config.access.lookup_failure, LookupFailurePolicy::FailClosed);
//! assert!(config.session.validate().is_ok());
//!
//! // Or customize. The default secret is empty, so set one before signing in.
//! let mut config = DashgateConfig {
//!     access: AccessConfig {
//!         lookup_timeout: Some(Duration::from_secs(3)),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! config.session.secret_key = SessionSecret::new("a-secret-that-is-at-least-32-bytes");
//! ```

use std::time::Duration;

use crate::session::{SameSite, SessionConfig, SessionSecret};

/// Top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct DashgateConfig {
    pub access: AccessConfig,
    pub routes: RouteConfig,
    pub session: SessionConfig,
    pub cors: CorsConfig,
}

impl DashgateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local development settings.
    ///
    /// Unreachable member stores grant access, matching how the dashboard
    /// behaved before lookups could fail closed, and cookies work over
    /// plain HTTP.
    pub fn development() -> Self {
        Self {
            access: AccessConfig {
                lookup_failure: LookupFailurePolicy::FailOpen,
                lookup_timeout: None,
            },
            routes: RouteConfig::default(),
            cors: CorsConfig::default(),
            session: SessionConfig {
                cookie_secure: false,
                cookie_same_site: SameSite::Lax,
                session_lifetime: chrono::Duration::days(7),
                secret_key: SessionSecret::generate(),
                ..SessionConfig::default()
            },
        }
    }

    /// Fail closed, bound lookups and keep sessions short.
    ///
    /// Sessions are signed with `secret`, which must be at least
    /// [`MIN_SECRET_LENGTH`](crate::session::MIN_SECRET_LENGTH) bytes for
    /// sign-in to succeed.
    pub fn strict(secret: SessionSecret) -> Self {
        Self {
            access: AccessConfig {
                lookup_failure: LookupFailurePolicy::FailClosed,
                lookup_timeout: Some(Duration::from_secs(5)),
            },
            routes: RouteConfig::default(),
            cors: CorsConfig::default(),
            session: SessionConfig {
                session_lifetime: chrono::Duration::hours(1),
                secret_key: secret,
                ..SessionConfig::default()
            },
        }
    }
}

/// What identity resolution does when the member store cannot answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupFailurePolicy {
    /// Deny every requirement for the affected principal.
    #[default]
    FailClosed,
    /// Treat the principal as having no record, i.e. as a super admin.
    FailOpen,
}

/// Identity resolution settings.
#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
    pub lookup_failure: LookupFailurePolicy,

    /// Upper bound on a single member lookup. A timeout counts as a lookup
    /// failure. `None` waits indefinitely.
    ///
    /// Default: `None`
    pub lookup_timeout: Option<Duration>,
}

/// Where the route guard sends people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Target of the automatic redirect for signed-out visitors.
    ///
    /// Default: `/login`
    pub login_route: String,

    /// Target of the button on the access-denied view.
    ///
    /// Default: `/`
    pub fallback_route: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login_route: "/login".to_owned(),
            fallback_route: "/".to_owned(),
        }
    }
}

/// Cross-origin access for dashboards served from another origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    /// Origins allowed to call the API with the session cookie. Empty
    /// disables CORS handling.
    ///
    /// Default: empty
    pub allowed_origins: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashgateConfig::default();

        assert_eq!(config.access.lookup_failure, LookupFailurePolicy::FailClosed);
        assert_eq!(config.access.lookup_timeout, None);
        assert_eq!(config.routes.login_route, "/login");
        assert_eq!(config.routes.fallback_route, "/");
        assert!(config.cors.allowed_origins.is_empty());
        assert!(config.session.validate().is_err());
    }

    #[test]
    fn test_development_config() {
        let config = DashgateConfig::development();

        assert_eq!(config.access.lookup_failure, LookupFailurePolicy::FailOpen);
        assert!(!config.session.cookie_secure);
        assert!(config.session.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = DashgateConfig::strict(SessionSecret::new("strict-preset-secret-long-enough!"));

        assert_eq!(config.access.lookup_failure, LookupFailurePolicy::FailClosed);
        assert_eq!(config.access.lookup_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.session.session_lifetime, chrono::Duration::hours(1));
        assert!(config.session.validate().is_ok());
    }

    #[test]
    fn test_strict_config_keeps_short_secret_invalid() {
        let config = DashgateConfig::strict(SessionSecret::default());

        assert!(config.session.validate().is_err());
    }
}
