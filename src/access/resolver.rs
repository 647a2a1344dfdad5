use chrono::Utc;

use super::Identity;
use crate::config::{AccessConfig, LookupFailurePolicy};
use crate::events::{AccessEvent, dispatch};
use crate::{AccessError, Principal, TeamMember, TeamMemberRepository};

/// Turns a signed-in principal into an [`Identity`].
///
/// Looks the principal up in the member store: a record makes it managed,
/// no record makes it an unmanaged super admin. A failed or timed out
/// lookup is handled according to [`LookupFailurePolicy`].
#[derive(Clone)]
pub struct IdentityResolver<M> {
    members: M,
    config: AccessConfig,
}

impl<M: TeamMemberRepository> IdentityResolver<M> {
    pub fn new(members: M, config: AccessConfig) -> Self {
        Self { members, config }
    }

    pub fn members(&self) -> &M {
        &self.members
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Resolves `principal`. `None` resolves to [`Identity::Anonymous`]
    /// without touching the store.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "resolve_identity",
            skip_all,
            fields(principal_id = principal.as_ref().map(|p| p.id.as_str()))
        )
    )]
    pub async fn resolve(&self, principal: Option<Principal>) -> Identity {
        let Some(principal) = principal else {
            return Identity::Anonymous;
        };

        let identity = match self.lookup(&principal).await {
            Ok(Some(member)) => Identity::Managed { principal, member },
            Ok(None) => Identity::Unmanaged { principal },
            Err(err) => return self.on_lookup_failure(principal, err).await,
        };

        log::debug!(
            target: "dashgate::access",
            "msg=\"identity resolved\" principal_id=\"{}\" managed={} role={:?}",
            identity.principal().map_or("-", |p| p.id.as_str()),
            identity.is_managed(),
            identity.role()
        );

        if let Some(principal) = identity.principal() {
            dispatch(AccessEvent::IdentityResolved {
                principal_id: principal.id.clone(),
                managed: identity.is_managed(),
                role: identity.role(),
                at: Utc::now(),
            })
            .await;
        }

        identity
    }

    /// The raw member lookup, bounded by the configured timeout.
    pub async fn lookup(&self, principal: &Principal) -> Result<Option<TeamMember>, AccessError> {
        let lookup = self.members.find_by_principal(principal);

        match self.config.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, lookup).await.map_err(|_| {
                AccessError::LookupFailed(format!("timed out after {}ms", limit.as_millis()))
            })?,
            None => lookup.await,
        }
    }

    async fn on_lookup_failure(&self, principal: Principal, err: AccessError) -> Identity {
        let policy = self.config.lookup_failure;

        log::warn!(
            target: "dashgate::access",
            "msg=\"team member lookup failed\" principal_id=\"{}\" policy={:?} error=\"{}\"",
            principal.id,
            policy,
            err
        );

        dispatch(AccessEvent::LookupFailed {
            principal_id: principal.id.clone(),
            reason: err.to_string(),
            policy,
            at: Utc::now(),
        })
        .await;

        match policy {
            LookupFailurePolicy::FailClosed => Identity::LookupFailed { principal },
            LookupFailurePolicy::FailOpen => Identity::Unmanaged { principal },
        }
    }
}
