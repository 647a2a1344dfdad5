use async_trait::async_trait;

use crate::events::{AccessEvent, Listener};

/// Emits access events as tracing spans/events.
///
/// Requires the `tracing` feature to be enabled.
///
/// # Example
///
/// ```rust,ignore
/// use dashgate::register_event_listeners;
/// use dashgate::events::listeners::TracingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(TracingListener);
/// });
/// ```
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &AccessEvent) {
        match event {
            AccessEvent::LookupFailed { .. } | AccessEvent::AccessDenied { .. } => {
                tracing::warn!(
                    target: "dashgate::events",
                    event_name = event.name(),
                    principal_id = event.principal_id(),
                    ?event,
                    "access event"
                );
            }
            _ => {
                tracing::info!(
                    target: "dashgate::events",
                    event_name = event.name(),
                    principal_id = event.principal_id(),
                    ?event,
                    "access event"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_tracing_listener_handle() {
        let listener = TracingListener;
        let event = AccessEvent::SignedIn {
            principal_id: "uid-1".to_owned(),
            email: "ops@example.com".to_owned(),
            at: Utc::now(),
        };

        // should not panic
        listener.handle(&event).await;
    }
}
