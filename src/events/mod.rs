//! Access events.
//!
//! Sign-in, sign-out, identity resolution and guard decisions all fire an
//! [`AccessEvent`]. Without registered listeners they are dropped.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dashgate::register_event_listeners;
//! use dashgate::events::listeners::LoggingListener;
//!
//! fn main() {
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AccessEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
