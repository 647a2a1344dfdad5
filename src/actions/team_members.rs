//! Team-member management: validated writes on top of the member store.

use crate::validators::{validate_create, validate_update};
use crate::{AccessError, CreateTeamMember, TeamMember, TeamMemberRepository, UpdateTeamMember};

pub struct CreateTeamMemberAction<M: TeamMemberRepository> {
    members: M,
}

impl<M: TeamMemberRepository> CreateTeamMemberAction<M> {
    pub fn new(members: M) -> Self {
        Self { members }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_team_member", skip_all, err)
    )]
    pub async fn execute(&self, mut data: CreateTeamMember) -> Result<TeamMember, AccessError> {
        data.email = data.email.trim().to_owned();
        data.name = data.name.trim().to_owned();
        validate_create(&data)?;

        let member = self.members.create(data).await?;

        log::info!(
            target: "dashgate",
            "msg=\"team member created\" member_id={} role={}",
            member.id,
            member.role
        );

        Ok(member)
    }
}

pub struct UpdateTeamMemberAction<M: TeamMemberRepository> {
    members: M,
}

impl<M: TeamMemberRepository> UpdateTeamMemberAction<M> {
    pub fn new(members: M) -> Self {
        Self { members }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_team_member", skip(self, data), err)
    )]
    pub async fn execute(
        &self,
        id: u64,
        mut data: UpdateTeamMember,
    ) -> Result<TeamMember, AccessError> {
        data.name = data.name.map(|name| name.trim().to_owned());
        validate_update(&data)?;

        let member = self.members.update(id, data).await?;

        log::info!(
            target: "dashgate",
            "msg=\"team member updated\" member_id={} role={} permissions={}",
            member.id,
            member.role,
            member.permissions.len()
        );

        Ok(member)
    }
}

/// Removing a record turns its principal into an unmanaged super admin.
pub struct DeleteTeamMemberAction<M: TeamMemberRepository> {
    members: M,
}

impl<M: TeamMemberRepository> DeleteTeamMemberAction<M> {
    pub fn new(members: M) -> Self {
        Self { members }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_team_member", skip(self), err)
    )]
    pub async fn execute(&self, id: u64) -> Result<(), AccessError> {
        self.members.delete(id).await?;

        log::info!(
            target: "dashgate",
            "msg=\"team member deleted\" member_id={id}"
        );

        Ok(())
    }
}
