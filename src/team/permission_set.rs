//! The set of permissions granted to a team member.
//!
//! Stored as a JSON array of identifiers (`["gem-coins", "teams"]`), which is
//! also the shape the team-management API reads and writes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::types::Permission;
use crate::AccessError;

/// Permissions explicitly granted to a team member.
///
/// Ordering is stable, so serialized output is deterministic.
///
/// # Example
///
/// ```rust
/// use dashgate::{Permission, PermissionSet};
///
/// let perms = PermissionSet::builder()
///     .grant(Permission::GemCoins)
///     .grant(Permission::DailyRewards)
///     .build();
///
/// assert!(perms.contains(Permission::GemCoins));
/// assert!(perms.contains_any(&[Permission::Teams, Permission::DailyRewards]));
/// assert!(!perms.contains_all(&[Permission::Teams, Permission::DailyRewards]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: BTreeSet<Permission>,
}

impl PermissionSet {
    pub const fn new() -> Self {
        Self {
            permissions: BTreeSet::new(),
        }
    }

    pub fn builder() -> PermissionSetBuilder {
        PermissionSetBuilder::new()
    }

    /// Returns `true` if the permission was not already granted.
    pub fn grant(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Returns `true` if the permission was granted before.
    pub fn revoke(&mut self, permission: Permission) -> bool {
        self.permissions.remove(&permission)
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// `false` for an empty request.
    pub fn contains_any(&self, requested: &[Permission]) -> bool {
        requested.iter().any(|p| self.contains(*p))
    }

    /// `true` for an empty request.
    pub fn contains_all(&self, requested: &[Permission]) -> bool {
        requested.iter().all(|p| self.contains(*p))
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Serialize for a text column.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.permissions).unwrap_or_else(|_| "[]".to_owned())
    }

    /// Parse a stored column. Unknown identifiers are an error, never dropped.
    pub fn from_json(json: &str) -> Result<Self, AccessError> {
        let raw: Vec<String> = serde_json::from_str(json)
            .map_err(|e| AccessError::Internal(format!("malformed permission list: {e}")))?;

        raw.iter()
            .map(|s| s.parse::<Permission>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|permissions| Self { permissions })
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::btree_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}

/// Fluent builder for [`PermissionSet`].
#[must_use]
#[derive(Default)]
pub struct PermissionSetBuilder {
    set: PermissionSet,
}

impl PermissionSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, permission: Permission) -> Self {
        self.set.grant(permission);
        self
    }

    pub fn build(self) -> PermissionSet {
        self.set
    }
}
