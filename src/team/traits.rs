//! Shared behaviour of the closed identifier sets.
//!
//! Roles, permissions and member statuses are stored and sent over the wire
//! as short strings. Each set is a closed enum so a typo fails to compile at
//! the request site and fails to parse at the storage boundary.

/// A closed set of string identifiers.
///
/// # Example
///
/// ```rust
/// use dashgate::team::{Catalog, Permission};
///
/// assert_eq!(Permission::GemCoins.as_str(), "gem-coins");
/// assert_eq!(Permission::lookup("gem-coins"), Some(Permission::GemCoins));
/// assert_eq!(Permission::lookup("gem-coin"), None);
/// ```
pub trait Catalog: Copy + Eq + Send + Sync + 'static {
    /// Every member of the set, in declaration order.
    const ALL: &'static [Self];

    /// Identifier used in storage and on the wire.
    fn as_str(&self) -> &'static str;

    /// Parses a stored identifier. Exact match only.
    fn lookup(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|item| item.as_str() == s)
    }
}
