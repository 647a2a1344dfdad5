use async_trait::async_trait;

use crate::events::{AccessEvent, Listener};

/// Logs access events through the `log` crate.
///
/// Failed lookups are always logged at WARN or above, whatever the
/// configured level.
///
/// # Example
///
/// ```rust,ignore
/// use dashgate::register_event_listeners;
/// use dashgate::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::new());
/// });
/// ```
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a new logging listener at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    /// Creates a new logging listener at the specified level.
    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }

    fn level_for(&self, event: &AccessEvent) -> log::Level {
        match event {
            AccessEvent::LookupFailed { .. } => self.level.min(log::Level::Warn),
            _ => self.level,
        }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &AccessEvent) {
        log::log!(
            target: "dashgate::events",
            self.level_for(event),
            "event={} principal_id=\"{}\" {:?}",
            event.name(),
            event.principal_id().unwrap_or("-"),
            event
        );
    }
}
