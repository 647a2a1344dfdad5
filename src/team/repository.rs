use std::sync::Arc;

use async_trait::async_trait;

use super::PermissionSet;
use super::types::{MemberStatus, Role, TeamMember};
use crate::{AccessError, Principal};

#[derive(Debug, Clone)]
pub struct CreateTeamMember {
    pub principal_id: Option<String>,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub permissions: PermissionSet,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: MemberStatus,
}

/// Fields left as `None` are not changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamMember {
    pub principal_id: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub permissions: Option<PermissionSet>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<MemberStatus>,
}

/// Storage for team-member records.
///
/// Identity resolution only calls the `find_*` methods; the write methods
/// back the team-management routes.
#[async_trait]
pub trait TeamMemberRepository: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Result<Option<TeamMember>, AccessError>;

    async fn find_by_principal_id(
        &self,
        principal_id: &str,
    ) -> Result<Option<TeamMember>, AccessError>;

    /// Case-insensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<TeamMember>, AccessError>;

    async fn list(&self) -> Result<Vec<TeamMember>, AccessError>;

    /// Fails with [`AccessError::AlreadyExists`] when the email or provider
    /// id is taken.
    async fn create(&self, data: CreateTeamMember) -> Result<TeamMember, AccessError>;

    async fn update(&self, id: u64, data: UpdateTeamMember) -> Result<TeamMember, AccessError>;

    async fn delete(&self, id: u64) -> Result<(), AccessError>;

    /// Record for `principal`: by provider id first, then by email for
    /// records not yet linked to a provider id. Whatever the store returns
    /// must also satisfy [`TeamMember::matches`].
    async fn find_by_principal(
        &self,
        principal: &Principal,
    ) -> Result<Option<TeamMember>, AccessError> {
        if let Some(member) = self.find_by_principal_id(&principal.id).await? {
            return Ok(Some(member));
        }

        Ok(self
            .find_by_email(&principal.email)
            .await?
            .filter(|member| member.matches(principal)))
    }
}

#[async_trait]
impl<T> TeamMemberRepository for Arc<T>
where
    T: TeamMemberRepository + ?Sized,
{
    async fn find_by_id(&self, id: u64) -> Result<Option<TeamMember>, AccessError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_principal_id(
        &self,
        principal_id: &str,
    ) -> Result<Option<TeamMember>, AccessError> {
        (**self).find_by_principal_id(principal_id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<TeamMember>, AccessError> {
        (**self).find_by_email(email).await
    }

    async fn list(&self) -> Result<Vec<TeamMember>, AccessError> {
        (**self).list().await
    }

    async fn create(&self, data: CreateTeamMember) -> Result<TeamMember, AccessError> {
        (**self).create(data).await
    }

    async fn update(&self, id: u64, data: UpdateTeamMember) -> Result<TeamMember, AccessError> {
        (**self).update(id, data).await
    }

    async fn delete(&self, id: u64) -> Result<(), AccessError> {
        (**self).delete(id).await
    }

    async fn find_by_principal(
        &self,
        principal: &Principal,
    ) -> Result<Option<TeamMember>, AccessError> {
        (**self).find_by_principal(principal).await
    }
}
