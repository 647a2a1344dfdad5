use std::fmt;

use super::token::generate_token;

/// Key used to sign session cookies.
///
/// `Debug` and `Display` never print the key.
///
/// # Example
///
/// ```rust
/// use dashgate::session::SessionSecret;
///
/// let secret = SessionSecret::new("a-secret-that-is-at-least-32-bytes");
/// assert_eq!(format!("{secret:?}"), "SessionSecret([REDACTED])");
/// assert_eq!(secret.expose_secret(), "a-secret-that-is-at-least-32-bytes");
/// ```
#[derive(Clone, Default)]
pub struct SessionSecret(String);

impl SessionSecret {
    /// Length of keys produced by [`generate`](Self::generate).
    pub const GENERATED_LENGTH: usize = 64;

    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// A random key, for development setups without a configured secret.
    /// Cookies signed with it do not survive a restart.
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_token(Self::GENERATED_LENGTH))
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret([REDACTED])")
    }
}

impl fmt::Display for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SessionSecret {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionSecret {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_output() {
        let secret = SessionSecret::from("do-not-print-me");

        assert_eq!(format!("{secret}"), "[REDACTED]");
        assert!(!format!("{secret:?}").contains("do-not-print-me"));
    }

    #[test]
    fn test_generate() {
        let first = SessionSecret::generate();
        let second = SessionSecret::generate();

        assert_eq!(first.len(), SessionSecret::GENERATED_LENGTH);
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(SessionSecret::default().is_empty());
    }
}
