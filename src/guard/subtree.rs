use crate::access::{AccessRequirement, AccessState, Decision, evaluate};

/// What a [`SubtreeGuard`] ends up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    Children(T),
    Fallback(T),
    /// Denied with no fallback supplied.
    Nothing,
    Loading,
}

impl<T> Rendered<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_children(&self) -> bool {
        matches!(self, Self::Children(_))
    }

    /// The rendered content, children or fallback.
    pub fn into_inner(self) -> Option<T> {
        match self {
            Self::Children(content) | Self::Fallback(content) => Some(content),
            Self::Nothing | Self::Loading => None,
        }
    }
}

/// Shows its children only when the requirement holds.
#[derive(Debug, Clone)]
pub struct SubtreeGuard {
    requirement: AccessRequirement,
}

impl SubtreeGuard {
    pub fn new(requirement: AccessRequirement) -> Self {
        Self { requirement }
    }

    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    pub fn decide(&self, state: &AccessState) -> Decision {
        evaluate(&self.requirement, state)
    }

    /// `children` is only built when access is allowed.
    pub fn render<T>(
        &self,
        state: &AccessState,
        children: impl FnOnce() -> T,
        fallback: Option<T>,
    ) -> Rendered<T> {
        match self.decide(state) {
            Decision::Indeterminate => Rendered::Loading,
            Decision::Allow => Rendered::Children(children()),
            Decision::Deny => fallback.map_or(Rendered::Nothing, Rendered::Fallback),
        }
    }
}
