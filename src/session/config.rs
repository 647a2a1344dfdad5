use chrono::Duration;

use super::SessionSecret;
use crate::AccessError;

/// Minimum accepted signing key length in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    Lax,
    #[default]
    Strict,
}

impl From<SameSite> for cookie::SameSite {
    fn from(same_site: SameSite) -> Self {
        match same_site {
            SameSite::None => Self::None,
            SameSite::Lax => Self::Lax,
            SameSite::Strict => Self::Strict,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    pub session_lifetime: Duration,
    pub secret_key: SessionSecret,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "dashgate_session".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_domain: None,
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Strict,
            session_lifetime: Duration::hours(8),
            secret_key: SessionSecret::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), AccessError> {
        if self.secret_key.is_empty() {
            return Err(AccessError::ConfigurationError(
                "session secret_key must not be empty".to_owned(),
            ));
        }
        if self.secret_key.len() < MIN_SECRET_LENGTH {
            return Err(AccessError::ConfigurationError(format!(
                "session secret_key must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }
        if self.session_lifetime <= Duration::zero() {
            return Err(AccessError::ConfigurationError(
                "session_lifetime must be positive".to_owned(),
            ));
        }
        if self.cookie_same_site == SameSite::None && !self.cookie_secure {
            return Err(AccessError::ConfigurationError(
                "SameSite=None cookies must be secure".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SessionConfig {
        SessionConfig {
            secret_key: SessionSecret::new("this-is-a-very-long-secret-key-for-testing"),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "dashgate_session");
        assert_eq!(config.cookie_path, "/");
        assert!(config.cookie_secure);
        assert!(config.cookie_http_only);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
    }

    #[test]
    fn test_validate_empty_secret() {
        let config = SessionConfig::default();
        assert!(matches!(
            config.validate(),
            Err(AccessError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_validate_short_secret() {
        let config = SessionConfig {
            secret_key: SessionSecret::new("short"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_valid_secret() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_lifetime() {
        let config = SessionConfig {
            session_lifetime: Duration::zero(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_insecure_same_site_none() {
        let config = SessionConfig {
            cookie_same_site: SameSite::None,
            cookie_secure: false,
            ..valid()
        };
        assert!(config.validate().is_err());
    }
}
