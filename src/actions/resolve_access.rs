use crate::access::{AccessState, IdentityResolver};
use crate::session::{SessionConfig, SessionRepository, load_principal};
use crate::{AccessError, Principal, TeamMemberRepository};

/// Turns a session cookie into a resolved [`AccessState`].
///
/// A missing, forged or stale cookie resolves to anonymous. Expired
/// sessions are destroyed on the way.
pub struct ResolveAccessAction<S, M> {
    sessions: S,
    resolver: IdentityResolver<M>,
    config: SessionConfig,
}

impl<S, M> ResolveAccessAction<S, M>
where
    S: SessionRepository,
    M: TeamMemberRepository,
{
    pub fn new(sessions: S, resolver: IdentityResolver<M>, config: SessionConfig) -> Self {
        Self {
            sessions,
            resolver,
            config,
        }
    }

    /// The principal signed in through `cookie_value`, if any.
    pub async fn principal(
        &self,
        cookie_value: Option<&str>,
    ) -> Result<Option<Principal>, AccessError> {
        match cookie_value {
            Some(value) => load_principal(&self.sessions, &self.config.secret_key, value).await,
            None => Ok(None),
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "resolve_access", skip_all, err)
    )]
    pub async fn execute(&self, cookie_value: Option<&str>) -> Result<AccessState, AccessError> {
        let principal = self.principal(cookie_value).await?;
        let identity = self.resolver.resolve(principal).await;

        Ok(AccessState::Resolved(identity))
    }

    pub fn resolver(&self) -> &IdentityResolver<M> {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::actions::SignInAction;
    use crate::config::AccessConfig;
    use crate::session::{InMemorySessionRepository, SessionData, SessionSecret, sign_session_id};
    use crate::{Identity, MockTeamMemberRepository, Permission, Role, TeamMember};

    fn config() -> SessionConfig {
        SessionConfig {
            secret_key: SessionSecret::new("test-secret-key-that-is-long-enough"),
            ..SessionConfig::default()
        }
    }

    fn action(
        sessions: &InMemorySessionRepository,
        members: &MockTeamMemberRepository,
    ) -> ResolveAccessAction<InMemorySessionRepository, MockTeamMemberRepository> {
        ResolveAccessAction::new(
            sessions.clone(),
            IdentityResolver::new(members.clone(), AccessConfig::default()),
            config(),
        )
    }

    #[tokio::test]
    async fn test_no_cookie_is_anonymous() {
        let sessions = InMemorySessionRepository::new();
        let members = MockTeamMemberRepository::new();

        let state = action(&sessions, &members).execute(None).await.unwrap();
        assert_eq!(state, AccessState::anonymous());
    }

    #[tokio::test]
    async fn test_signed_in_member_resolves() {
        let sessions = InMemorySessionRepository::new();
        let members = MockTeamMemberRepository::new();
        members.insert(TeamMember::mock(
            "dev@example.com",
            Role::Developer,
            &[Permission::VehicleBrands],
        ));

        let signed = SignInAction::new(sessions.clone(), config())
            .execute(Principal::mock_from_email("dev@example.com"))
            .await
            .unwrap();

        let state = action(&sessions, &members)
            .execute(Some(&signed.cookie_value))
            .await
            .unwrap();

        assert_eq!(state.role(), Some(Role::Developer));
        assert!(state.has_permission(Permission::VehicleBrands));
    }

    #[tokio::test]
    async fn test_forged_cookie_is_anonymous() {
        let sessions = InMemorySessionRepository::new();
        let members = MockTeamMemberRepository::new();

        let state = action(&sessions, &members)
            .execute(Some("made-up.deadbeef"))
            .await
            .unwrap();
        assert_eq!(state.identity(), Some(&Identity::Anonymous));
    }

    #[tokio::test]
    async fn test_expired_session_is_destroyed() {
        let sessions = InMemorySessionRepository::new();
        let members = MockTeamMemberRepository::new();

        let session_id = sessions
            .create(SessionData {
                principal: Principal::mock_from_email("ops@example.com"),
                created_at: Utc::now() - Duration::hours(3),
                expires_at: Utc::now() - Duration::hours(1),
            })
            .await
            .unwrap();
        let cookie_value = sign_session_id(&session_id, &config().secret_key).unwrap();

        let state = action(&sessions, &members)
            .execute(Some(&cookie_value))
            .await
            .unwrap();

        assert_eq!(state, AccessState::anonymous());
        assert!(sessions.is_empty());
    }
}
