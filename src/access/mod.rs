//! Access control core: requirements, identities and their evaluation.
//!
//! [`IdentityResolver`] turns a signed-in principal into an [`Identity`],
//! [`AccessSession`] keeps the resolved [`AccessState`] for a signed-in
//! surface, and [`evaluate`] decides whether that state satisfies an
//! [`AccessRequirement`].

mod evaluator;
mod identity;
mod requirement;
mod resolver;
mod session;

pub use evaluator::{Decision, allows, evaluate};
pub use identity::{AccessState, Identity};
pub use requirement::{AccessRequirement, RequirementInput};
pub use resolver::IdentityResolver;
pub use session::AccessSession;
