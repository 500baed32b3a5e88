//! # Fan-out of run events to subscribers.
//!
//! Each subscriber owns a *lane*: a bounded mpsc queue feeding one worker
//! task. [`SubscriberSet::emit`] only ever `try_send`s, so the listener
//! forwarding bus events never waits on a subscriber.
//!
//! ```text
//! emit(ev) ─┬─► lane "log"    [queue] ─► worker ─► on_event
//!           └─► lane "custom" [queue] ─► worker ─► on_event ─ panic ─► SubscriberPanicked
//!
//! full or closed queue ─► event dropped for that lane ─► SubscriberOverflow
//! ```
//!
//! Panics are caught with `AssertUnwindSafe`; a subscriber that panics while
//! holding its own lock may leave that state poisoned.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::error::panic_message;
use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

struct Lane {
    name: &'static str,
    tx: mpsc::Sender<Arc<Event>>,
    worker: JoinHandle<()>,
}

impl Lane {
    fn open(sub: Arc<dyn Subscribe>, bus: Bus) -> Self {
        let name = sub.name();
        let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
        let worker = tokio::spawn(drain_lane(sub, rx, bus));
        Self { name, tx, worker }
    }
}

async fn drain_lane(sub: Arc<dyn Subscribe>, mut rx: mpsc::Receiver<Arc<Event>>, bus: Bus) {
    while let Some(ev) = rx.recv().await {
        let handled = std::panic::AssertUnwindSafe(sub.on_event(&ev))
            .catch_unwind()
            .await;
        if let Err(payload) = handled {
            bus.publish(Event::subscriber_panicked(sub.name(), panic_message(&*payload)));
        }
    }
}

/// Subscribers of one run, each behind its own queue and worker.
pub struct SubscriberSet {
    lanes: Vec<Lane>,
    bus: Bus,
}

impl SubscriberSet {
    /// Opens one lane per subscriber. Needs a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let lanes = subs
            .into_iter()
            .map(|sub| Lane::open(sub, bus.clone()))
            .collect();
        Self { lanes, bus }
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Queues `event` on every lane.
    pub fn emit(&self, event: &Event) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Like [`emit`](Self::emit) without the clone. An overflow notice that
    /// itself overflows is dropped silently.
    pub fn emit_arc(&self, event: Arc<Event>) {
        for lane in &self.lanes {
            let reason = match lane.tx.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !event.is_subscriber_overflow() {
                self.bus
                    .publish(Event::subscriber_overflow(lane.name, reason));
            }
        }
    }

    /// Closes every lane and waits until each worker has handled its backlog.
    pub async fn shutdown(self) {
        let mut workers = Vec::with_capacity(self.lanes.len());
        for lane in self.lanes {
            drop(lane.tx);
            workers.push(lane.worker);
        }
        for worker in workers {
            let _ = worker.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Collect(Arc<Mutex<Vec<u64>>>);

    #[async_trait]
    impl Subscribe for Collect {
        async fn on_event(&self, ev: &Event) {
            self.0.lock().unwrap().push(ev.seq);
        }
        fn name(&self) -> &'static str {
            "collect"
        }
    }

    struct Explode;

    #[async_trait]
    impl Subscribe for Explode {
        async fn on_event(&self, _ev: &Event) {
            panic!("subscriber blew up");
        }
        fn name(&self) -> &'static str {
            "explode"
        }
    }

    struct Stuck;

    #[async_trait]
    impl Subscribe for Stuck {
        async fn on_event(&self, _ev: &Event) {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        }
        fn name(&self) -> &'static str {
            "stuck"
        }
        fn queue_capacity(&self) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn shutdown_flushes_queued_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let set = SubscriberSet::new(vec![Arc::new(Collect(seen.clone()))], Bus::new(16));

        let evs: Vec<Event> = (0..5).map(|_| Event::new(EventKind::StoreEmpty)).collect();
        for ev in &evs {
            set.emit(ev);
        }
        set.shutdown().await;

        let expected: Vec<u64> = evs.iter().map(|e| e.seq).collect();
        assert_eq!(*seen.lock().unwrap(), expected);
    }

    #[tokio::test]
    async fn panicking_subscriber_is_reported() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = SubscriberSet::new(vec![Arc::new(Explode)], bus.clone());

        set.emit(&Event::new(EventKind::StoreReset));
        set.shutdown().await;

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.task.as_deref(), Some("explode"));
        assert_eq!(ev.reason.as_deref(), Some("subscriber blew up"));
    }

    #[tokio::test]
    async fn full_lane_reports_overflow() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = SubscriberSet::new(vec![Arc::new(Stuck)], bus.clone());

        for _ in 0..4 {
            set.emit(&Event::new(EventKind::StoreEmpty));
        }

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::SubscriberOverflow);
        assert_eq!(ev.task.as_deref(), Some("stuck"));
    }
}
