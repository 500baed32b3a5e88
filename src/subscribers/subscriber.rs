//! # Subscriber trait: consumers of the run's event stream.
//!
//! A [`Subscribe`] implementation receives every event the writers, the
//! reader and the supervisor publish. It runs on its own worker behind a
//! bounded queue, so a slow sink (a file, a socket) never delays an append
//! under the gate.
//!
//! ```rust
//! use async_trait::async_trait;
//! use parityvisor::{Event, EventKind, Subscribe};
//!
//! struct WriteFailures;
//!
//! #[async_trait]
//! impl Subscribe for WriteFailures {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::StoreFailed {
//!             eprintln!("{}: {}", ev.task.as_deref().unwrap_or("?"), ev.message());
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "write-failures"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Handler for run events.
///
/// Events arrive one at a time in publication order. A panic inside
/// [`on_event`](Self::on_event) is caught and republished as
/// `SubscriberPanicked`; the worker keeps going with the next event.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    async fn on_event(&self, event: &Event);

    /// Short name carried by overflow and panic events.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Queue depth before events are dropped for this subscriber (min 1).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
