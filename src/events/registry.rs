use std::sync::OnceLock;

use super::{AccessEvent, Listener};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Registry holding all registered event listeners.
///
/// Use [`register_event_listeners`] to configure listeners at application startup.
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener to receive events.
    ///
    /// Listeners are called in the order they are registered.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    async fn dispatch(&self, event: &AccessEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Register event listeners at application startup.
///
/// Only the first call takes effect. Without it, events are dropped.
///
/// # Example
///
/// ```rust,ignore
/// use dashgate::register_event_listeners;
/// use dashgate::events::listeners::LoggingListener;
///
/// fn main() {
///     register_event_listeners(|registry| {
///         registry.listen(LoggingListener::new());
///     });
///
///     // start server...
/// }
/// ```
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "dashgate",
            "msg=\"register_event_listeners called more than once, ignoring\""
        );
    }
}

/// Dispatch an event to all registered listeners.
///
/// If no listeners are registered, this is a no-op.
pub async fn dispatch(event: AccessEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    const MARKER_PATH: &str = "/__registry-marker";

    struct MarkerListener {
        seen: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Listener for MarkerListener {
        async fn handle(&self, event: &AccessEvent) {
            match event {
                AccessEvent::LoginRequired { path, .. } if path == MARKER_PATH => {
                    self.seen.fetch_add(1, Ordering::SeqCst);
                }
                _ => {}
            }
        }
    }

    // The registry is process-global, so this is the only test that
    // registers anything.
    #[tokio::test]
    async fn test_registered_listener_receives_events() {
        let seen = Arc::new(AtomicUsize::new(0));
        let marker = MarkerListener { seen: seen.clone() };

        register_event_listeners(|registry| {
            registry.listen(marker);
        });
        // second registration is ignored
        register_event_listeners(|_| {});

        dispatch(AccessEvent::LoginRequired {
            path: MARKER_PATH.to_owned(),
            at: Utc::now(),
        })
        .await;

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
