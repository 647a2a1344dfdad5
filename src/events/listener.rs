use async_trait::async_trait;

use super::AccessEvent;

/// Handles access events asynchronously.
///
/// # Example
///
/// ```rust,ignore
/// use dashgate::events::{AccessEvent, Listener};
/// use async_trait::async_trait;
///
/// struct DeniedCounter;
///
/// #[async_trait]
/// impl Listener for DeniedCounter {
///     async fn handle(&self, event: &AccessEvent) {
///         if let AccessEvent::AccessDenied { principal_id, .. } = event {
///             // count denials per principal
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Called for every dispatched event.
    async fn handle(&self, event: &AccessEvent);
}
