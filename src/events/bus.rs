//! # Event bus shared by every participant of a run.
//!
//! [`Bus`] wraps a [`tokio::sync::broadcast`] sender. The writers, the tail
//! reader, the task runner and the supervisor all publish into it; the
//! supervisor's listener is the one long-lived receiver and hands events on
//! to the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ```text
//! even-writer ─┐
//! odd-writer  ─┼─► Bus ─► listener ─► SubscriberSet ─► LogWriter, ...
//! tail-reader ─┤
//! supervisor  ─┘
//! ```
//!
//! Publishing never waits. The ring buffer is shared by all receivers; one
//! that falls more than `capacity` events behind sees `Lagged(n)` and loses
//! the oldest `n`. Events sent while nobody is subscribed are gone.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone; every task gets its own handle.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
