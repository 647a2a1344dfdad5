use serde::Serialize;

use crate::{Permission, PermissionSet, Principal, Role, TeamMember};

static NO_PERMISSIONS: PermissionSet = PermissionSet::new();

/// Who is asking, as far as access control is concerned.
///
/// A signed-in principal is either managed (it has a [`TeamMember`]) or
/// unmanaged (no record, a super admin). `LookupFailed` is not a third kind
/// of principal: it marks a principal whose record could not be read while
/// the resolver was failing closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Anonymous,
    Managed {
        principal: Principal,
        member: TeamMember,
    },
    Unmanaged {
        principal: Principal,
    },
    LookupFailed {
        principal: Principal,
    },
}

impl Identity {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::Managed { principal, .. }
            | Self::Unmanaged { principal }
            | Self::LookupFailed { principal } => Some(principal),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal().is_some()
    }

    pub fn team_member(&self) -> Option<&TeamMember> {
        match self {
            Self::Managed { member, .. } => Some(member),
            _ => None,
        }
    }

    pub fn is_managed(&self) -> bool {
        matches!(self, Self::Managed { .. })
    }

    /// Only managed principals hold a role.
    pub fn role(&self) -> Option<Role> {
        self.team_member().map(|member| member.role)
    }

    /// Explicit grants. Empty for everyone but managed principals.
    pub fn permissions(&self) -> &PermissionSet {
        self.team_member()
            .map_or(&NO_PERMISSIONS, |member| &member.permissions)
    }

    /// Managed admins and unmanaged principals.
    pub fn is_admin(&self) -> bool {
        match self {
            Self::Managed { member, .. } => member.is_admin(),
            Self::Unmanaged { .. } => true,
            Self::Anonymous | Self::LookupFailed { .. } => false,
        }
    }

    /// Signed in without a team-member record.
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::Unmanaged { .. })
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(permission)
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.permissions().contains_any(permissions)
    }

    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        self.permissions().contains_all(permissions)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }
}

/// Access state as observed by guards.
///
/// `Loading` lasts until both the signed-in principal and its member record
/// are known. Guards show a neutral affordance while loading, never a denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "identity", rename_all = "snake_case")]
pub enum AccessState {
    Loading,
    Resolved(Identity),
}

impl AccessState {
    pub fn anonymous() -> Self {
        Self::Resolved(Identity::Anonymous)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Loading => None,
            Self::Resolved(identity) => Some(identity),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.identity().and_then(Identity::principal)
    }

    pub fn team_member(&self) -> Option<&TeamMember> {
        self.identity().and_then(Identity::team_member)
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().and_then(Identity::role)
    }

    pub fn permissions(&self) -> &PermissionSet {
        self.identity()
            .map_or(&NO_PERMISSIONS, Identity::permissions)
    }

    pub fn is_admin(&self) -> bool {
        self.identity().is_some_and(Identity::is_admin)
    }

    pub fn is_super_admin(&self) -> bool {
        self.identity().is_some_and(Identity::is_super_admin)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(permission)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }
}

impl From<Identity> for AccessState {
    fn from(identity: Identity) -> Self {
        Self::Resolved(identity)
    }
}
