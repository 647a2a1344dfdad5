use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{Decision, Identity};
use crate::{
    AccessError, CreateTeamMember, MemberStatus, Permission, PermissionSet, Principal, Role,
    TeamMember, UpdateTeamMember,
};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct CreateTeamMemberRequest {
    #[serde(default)]
    pub principal_id: Option<String>,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: PermissionSet,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub status: MemberStatus,
}

impl From<CreateTeamMemberRequest> for CreateTeamMember {
    fn from(req: CreateTeamMemberRequest) -> Self {
        Self {
            principal_id: req.principal_id,
            email: req.email,
            name: req.name,
            role: req.role,
            permissions: req.permissions,
            department: req.department,
            position: req.position,
            status: req.status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTeamMemberRequest {
    pub principal_id: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub permissions: Option<PermissionSet>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<MemberStatus>,
}

impl From<UpdateTeamMemberRequest> for UpdateTeamMember {
    fn from(req: UpdateTeamMemberRequest) -> Self {
        Self {
            principal_id: req.principal_id,
            name: req.name,
            role: req.role,
            permissions: req.permissions,
            department: req.department,
            position: req.position,
            status: req.status,
        }
    }
}

// Response DTOs

#[derive(Debug, Clone, Serialize)]
pub struct TeamMemberResponse {
    pub id: u64,
    pub principal_id: Option<String>,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub permissions: PermissionSet,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(member: TeamMember) -> Self {
        Self {
            id: member.id,
            principal_id: member.principal_id,
            email: member.email,
            name: member.name,
            role: member.role,
            permissions: member.permissions,
            department: member.department,
            position: member.position,
            status: member.status,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// What the current principal may do, as shown to the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AccessResponse {
    pub principal: Option<Principal>,
    pub managed: bool,
    pub role: Option<Role>,
    pub permissions: Vec<Permission>,
    pub is_admin: bool,
    pub is_super_admin: bool,
    pub team_member: Option<TeamMemberResponse>,
}

impl From<&Identity> for AccessResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            principal: identity.principal().cloned(),
            managed: identity.is_managed(),
            role: identity.role(),
            permissions: identity.permissions().iter().collect(),
            is_admin: identity.is_admin(),
            is_super_admin: identity.is_super_admin(),
            team_member: identity
                .team_member()
                .cloned()
                .map(TeamMemberResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckAccessResponse {
    pub decision: Decision,
    pub allowed: bool,
    pub requirement: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Stable machine-readable code for each error.
pub fn error_code(err: &AccessError) -> &'static str {
    match err {
        AccessError::Unauthenticated => "UNAUTHENTICATED",
        AccessError::Forbidden => "FORBIDDEN",
        AccessError::NotFound => "NOT_FOUND",
        AccessError::AlreadyExists => "ALREADY_EXISTS",
        AccessError::Validation(_) => "VALIDATION_ERROR",
        AccessError::UnknownRole(_) => "UNKNOWN_ROLE",
        AccessError::UnknownPermission(_) => "UNKNOWN_PERMISSION",
        AccessError::UnknownStatus(_) => "UNKNOWN_STATUS",
        AccessError::LookupFailed(_) => "LOOKUP_FAILED",
        AccessError::DatabaseError(_) => "DATABASE_ERROR",
        AccessError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        AccessError::Internal(_) => "INTERNAL_ERROR",
    }
}

impl From<AccessError> for ErrorResponse {
    fn from(err: AccessError) -> Self {
        let code = error_code(&err);
        // store and configuration details stay in the logs
        let error = match err {
            AccessError::DatabaseError(_)
            | AccessError::ConfigurationError(_)
            | AccessError::Internal(_) => "Internal server error".to_owned(),
            AccessError::LookupFailed(_) => "Access could not be verified, try again".to_owned(),
            other => other.to_string(),
        };

        Self { error, code }
    }
}
