//! Team membership: roles, permissions and the member store.

mod permission_set;
mod repository;
mod traits;
mod types;

#[cfg(any(test, feature = "mocks"))]
mod mocks;

pub use permission_set::{PermissionSet, PermissionSetBuilder};
pub use repository::{CreateTeamMember, TeamMemberRepository, UpdateTeamMember};
pub use traits::Catalog;
pub use types::{MemberStatus, Permission, Role, TeamMember};

#[cfg(any(test, feature = "mocks"))]
pub use mocks::MockTeamMemberRepository;
