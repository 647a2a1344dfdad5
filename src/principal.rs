use serde::{Deserialize, Serialize};

/// The signed-in identity handed over by the authentication provider.
///
/// `dashgate` never authenticates a principal itself; it only reads the
/// identity the provider produced and looks up the matching team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque identifier issued by the identity provider.
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[cfg(any(test, feature = "mocks"))]
    pub fn mock_from_email(email: &str) -> Self {
        let id = format!("uid-{}", email.split('@').next().unwrap_or(email));
        Self::new(id, email)
    }
}
