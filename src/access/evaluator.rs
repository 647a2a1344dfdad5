//! The access predicate.
//!
//! Evaluation order:
//!
//! 1. Loading state: [`Decision::Indeterminate`].
//! 2. No principal, or a failed lookup: deny.
//! 3. Admin override on and the principal is an admin: allow.
//! 4. Nothing requested: allow.
//! 5. Permissions: ALL or ANY of the requested list, vacuously true if empty.
//! 6. Roles: same rule against the principal's single role.
//! 7. Allow when both 5 and 6 hold.

use serde::Serialize;

use super::{AccessRequirement, AccessState, Identity};

/// Outcome of evaluating a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
    /// Identity resolution has not finished; guards show a loading state.
    Indeterminate,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }

    pub fn is_indeterminate(self) -> bool {
        self == Self::Indeterminate
    }

    fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }
}

/// Evaluates `requirement` against the current access state. Pure.
///
/// # Example
///
/// ```rust
/// use dashgate::{AccessRequirement, AccessState, Decision, Identity, Permission, Principal};
///
/// let state = AccessState::Resolved(Identity::Unmanaged {
///     principal: Principal::new("uid-1", "root@example.com"),
/// });
///
/// let decision = dashgate::evaluate(&AccessRequirement::permission(Permission::Teams), &state);
/// assert_eq!(decision, Decision::Allow);
/// ```
pub fn evaluate(requirement: &AccessRequirement, state: &AccessState) -> Decision {
    match state {
        AccessState::Loading => Decision::Indeterminate,
        AccessState::Resolved(identity) => Decision::from_bool(allows(requirement, identity)),
    }
}

/// The boolean part of [`evaluate`] for an already resolved identity.
pub fn allows(requirement: &AccessRequirement, identity: &Identity) -> bool {
    if matches!(identity, Identity::Anonymous | Identity::LookupFailed { .. }) {
        return false;
    }

    if requirement.allows_admin_override() && identity.is_admin() {
        return true;
    }

    if requirement.is_bare() {
        return true;
    }

    permissions_satisfied(requirement, identity) && roles_satisfied(requirement, identity)
}

fn permissions_satisfied(requirement: &AccessRequirement, identity: &Identity) -> bool {
    let requested = requirement.permissions();
    if requested.is_empty() {
        return true;
    }

    if requirement.requires_all() {
        identity.has_all_permissions(requested)
    } else {
        identity.has_any_permission(requested)
    }
}

// A principal holds at most one role, so ALL over two distinct roles never
// passes.
fn roles_satisfied(requirement: &AccessRequirement, identity: &Identity) -> bool {
    let requested = requirement.roles();
    if requested.is_empty() {
        return true;
    }

    if requirement.requires_all() {
        requested.iter().all(|role| identity.has_role(*role))
    } else {
        requested.iter().any(|role| identity.has_role(*role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Catalog;
    use crate::{Permission, Principal, Role, TeamMember};

    fn managed(role: Role, permissions: &[Permission]) -> AccessState {
        AccessState::Resolved(Identity::Managed {
            principal: Principal::mock_from_email("member@example.com"),
            member: TeamMember::mock("member@example.com", role, permissions),
        })
    }

    fn unmanaged() -> AccessState {
        AccessState::Resolved(Identity::Unmanaged {
            principal: Principal::mock_from_email("root@example.com"),
        })
    }

    #[test]
    fn test_loading_is_indeterminate() {
        let requirement = AccessRequirement::permission(Permission::Teams);
        assert_eq!(
            evaluate(&requirement, &AccessState::Loading),
            Decision::Indeterminate
        );
        assert_eq!(
            evaluate(&AccessRequirement::authenticated(), &AccessState::Loading),
            Decision::Indeterminate
        );
    }

    #[test]
    fn test_anonymous_is_denied() {
        let state = AccessState::anonymous();
        assert_eq!(
            evaluate(&AccessRequirement::authenticated(), &state),
            Decision::Deny
        );
    }

    #[test]
    fn test_bare_requirement_allows_any_principal() {
        let requirement = AccessRequirement::authenticated();

        for state in [
            managed(Role::Tester, &[]),
            managed(Role::Developer, &[Permission::Users]),
            managed(Role::Admin, &[]),
            unmanaged(),
        ] {
            assert_eq!(evaluate(&requirement, &state), Decision::Allow);
        }
    }

    #[test]
    fn test_bare_requirement_allows_without_admin_override() {
        let requirement = AccessRequirement::authenticated().admin_override(false);
        assert!(evaluate(&requirement, &managed(Role::Tester, &[])).is_allowed());
    }

    #[test]
    fn test_admins_pass_any_requirement() {
        let requirements = [
            AccessRequirement::permission(Permission::Teams),
            AccessRequirement::role(Role::Tester),
            AccessRequirement::permission(Permission::GemCoins)
                .with_permission(Permission::Users)
                .with_roles([Role::Developer, Role::Tester])
                .require_all(true),
        ];

        for requirement in &requirements {
            assert!(evaluate(requirement, &managed(Role::Admin, &[])).is_allowed());
            assert!(evaluate(requirement, &unmanaged()).is_allowed());
        }
    }

    #[test]
    fn test_non_admin_without_override_cannot_claim_admin_role() {
        let requirement = AccessRequirement::role(Role::Admin).admin_override(false);

        for role in [Role::Developer, Role::Tester] {
            let state = managed(role, Permission::ALL);
            assert_eq!(evaluate(&requirement, &state), Decision::Deny);
        }
    }

    #[test]
    fn test_admin_without_override_is_checked_normally() {
        let state = managed(Role::Admin, &[]);

        let by_role = AccessRequirement::role(Role::Admin).admin_override(false);
        assert!(evaluate(&by_role, &state).is_allowed());

        let by_permission = AccessRequirement::permission(Permission::Teams).admin_override(false);
        assert!(!evaluate(&by_permission, &state).is_allowed());
    }

    #[test]
    fn test_unmanaged_without_override_has_no_grants() {
        let requirement = AccessRequirement::permission(Permission::Teams).admin_override(false);
        assert_eq!(evaluate(&requirement, &unmanaged()), Decision::Deny);
    }

    #[test]
    fn test_any_semantics() {
        let requirement = AccessRequirement::permission(Permission::GemCoins)
            .with_permission(Permission::Users);
        let state = managed(Role::Developer, &[Permission::GemCoins]);

        assert_eq!(evaluate(&requirement, &state), Decision::Allow);
    }

    #[test]
    fn test_all_semantics() {
        let requirement = AccessRequirement::permission(Permission::GemCoins)
            .with_permission(Permission::Users)
            .require_all(true);
        let state = managed(Role::Developer, &[Permission::GemCoins]);

        assert_eq!(evaluate(&requirement, &state), Decision::Deny);

        let state = managed(Role::Developer, &[Permission::GemCoins, Permission::Users]);
        assert_eq!(evaluate(&requirement, &state), Decision::Allow);
    }

    #[test]
    fn test_multi_role_all_is_unsatisfiable() {
        let requirement = AccessRequirement::default()
            .with_roles([Role::Admin, Role::Developer])
            .require_all(true);
        let state = managed(Role::Developer, &[]);

        assert_eq!(evaluate(&requirement, &state), Decision::Deny);
    }

    #[test]
    fn test_repeated_single_role_all_is_satisfiable() {
        let requirement = AccessRequirement::role(Role::Developer)
            .with_role(Role::Developer)
            .require_all(true);

        assert!(evaluate(&requirement, &managed(Role::Developer, &[])).is_allowed());
    }

    #[test]
    fn test_role_any_semantics() {
        let requirement = AccessRequirement::default().with_roles([Role::Developer, Role::Tester]);

        assert!(evaluate(&requirement, &managed(Role::Tester, &[])).is_allowed());
    }

    #[test]
    fn test_permission_and_role_both_required() {
        let requirement =
            AccessRequirement::permission(Permission::QaReleases).with_role(Role::Tester);

        assert!(evaluate(&requirement, &managed(Role::Tester, &[Permission::QaReleases])).is_allowed());
        assert!(!evaluate(&requirement, &managed(Role::Tester, &[])).is_allowed());
        assert!(
            !evaluate(&requirement, &managed(Role::Developer, &[Permission::QaReleases]))
                .is_allowed()
        );
    }

    #[test]
    fn test_role_is_not_inferred_from_permissions() {
        let requirement = AccessRequirement::role(Role::Admin);
        let state = managed(Role::Tester, Permission::ALL);

        assert_eq!(evaluate(&requirement, &state), Decision::Deny);
    }

    #[test]
    fn test_lookup_failure_denies_everything() {
        let state = AccessState::Resolved(Identity::LookupFailed {
            principal: Principal::mock_from_email("member@example.com"),
        });

        assert_eq!(
            evaluate(&AccessRequirement::authenticated(), &state),
            Decision::Deny
        );
        assert_eq!(
            evaluate(&AccessRequirement::permission(Permission::Teams), &state),
            Decision::Deny
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let requirement = AccessRequirement::permission(Permission::GemCoins)
            .with_role(Role::Developer)
            .require_all(true);
        let state = managed(Role::Developer, &[Permission::GemCoins]);

        let first = evaluate(&requirement, &state);
        let second = evaluate(&requirement, &state);
        assert_eq!(first, second);
        assert_eq!(first, Decision::Allow);
    }
}
