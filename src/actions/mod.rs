//! Session and team-member operations, one struct per action.

mod prune_sessions;
mod resolve_access;
mod sign_in;
mod sign_out;
mod team_members;

pub use prune_sessions::PruneExpiredSessionsAction;
pub use resolve_access::ResolveAccessAction;
pub use sign_in::{SignInAction, SignedSession};
pub use sign_out::SignOutAction;
pub use team_members::{CreateTeamMemberAction, DeleteTeamMemberAction, UpdateTeamMemberAction};
