use std::fmt;

use serde::Deserialize;

use crate::team::Catalog;
use crate::{Permission, Role};

/// What a guarded page or fragment asks of the current principal.
///
/// An empty requirement only asks that someone is signed in. Permissions and
/// roles are combined with ANY semantics unless [`require_all`] is set, and
/// admins pass unconditionally unless [`admin_override`] is turned off.
///
/// [`require_all`]: AccessRequirement::require_all
/// [`admin_override`]: AccessRequirement::admin_override
///
/// # Example
///
/// ```rust
/// use dashgate::{AccessRequirement, Permission, Role};
///
/// let requirement = AccessRequirement::permission(Permission::GemCoins)
///     .with_permission(Permission::DailyRewards)
///     .with_role(Role::Developer)
///     .require_all(true);
///
/// assert_eq!(requirement.permissions().len(), 2);
/// assert!(requirement.requires_all());
/// assert!(requirement.allows_admin_override());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct AccessRequirement {
    permissions: Vec<Permission>,
    roles: Vec<Role>,
    require_all: bool,
    admin_override: bool,
}

impl Default for AccessRequirement {
    fn default() -> Self {
        Self {
            permissions: Vec::new(),
            roles: Vec::new(),
            require_all: false,
            admin_override: true,
        }
    }
}

impl AccessRequirement {
    /// Signed-in check only.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn permission(permission: Permission) -> Self {
        Self::default().with_permission(permission)
    }

    pub fn role(role: Role) -> Self {
        Self::default().with_role(role)
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// `true` switches both lists from ANY to ALL.
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    /// `false` makes admins go through the same checks as everyone else.
    pub fn admin_override(mut self, enabled: bool) -> Self {
        self.admin_override = enabled;
        self
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn requires_all(&self) -> bool {
        self.require_all
    }

    pub fn allows_admin_override(&self) -> bool {
        self.admin_override
    }

    /// No permissions and no roles requested.
    pub fn is_bare(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }
}

impl fmt::Display for AccessRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: Vec<&str>| items.join(",");
        write!(
            f,
            "permissions=[{}] roles=[{}] mode={} admin_override={}",
            join(self.permissions.iter().map(|p| p.as_str()).collect()),
            join(self.roles.iter().map(|r| r.as_str()).collect()),
            if self.require_all { "all" } else { "any" },
            self.admin_override
        )
    }
}

/// Wire form of a requirement, as sent by dashboard clients.
///
/// Singular and plural fields may both be present; the singular value is
/// appended to the list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementInput {
    pub permission: Option<Permission>,
    pub permissions: Vec<Permission>,
    pub role: Option<Role>,
    pub roles: Vec<Role>,
    pub require_all: Option<bool>,
    pub admin_override: Option<bool>,
}

impl From<RequirementInput> for AccessRequirement {
    fn from(input: RequirementInput) -> Self {
        let defaults = AccessRequirement::default();

        AccessRequirement::default()
            .with_permissions(input.permissions)
            .with_permissions(input.permission)
            .with_roles(input.roles)
            .with_roles(input.role)
            .require_all(input.require_all.unwrap_or(defaults.require_all))
            .admin_override(input.admin_override.unwrap_or(defaults.admin_override))
    }
}
