#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parityvisor::{Config, Event, EventKind, MemorySink, Sink};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// In-memory sink that fails the appends whose (0-based) index is listed.
pub struct FlakySink {
    inner: MemorySink,
    fail_on: Vec<usize>,
    appends: Arc<AtomicUsize>,
}

impl FlakySink {
    pub fn failing_appends(fail_on: impl Into<Vec<usize>>) -> Self {
        Self {
            inner: MemorySink::new(),
            fail_on: fail_on.into(),
            appends: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of attempted appends, readable after the sink moved into a store.
    pub fn attempts(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.appends)
    }
}

#[async_trait]
impl Sink for FlakySink {
    async fn reset(&mut self) -> io::Result<()> {
        self.inner.reset().await
    }

    async fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        let n = self.appends.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&n) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected append failure"));
        }
        self.inner.append(bytes).await
    }

    async fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.inner.read_all().await
    }
}

/// Sink whose writes always fail; reset fails too when asked.
pub struct BrokenSink {
    pub fail_reset: bool,
}

#[async_trait]
impl Sink for BrokenSink {
    async fn reset(&mut self) -> io::Result<()> {
        if self.fail_reset {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only medium"))
        } else {
            Ok(())
        }
    }

    async fn append(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "medium gone"))
    }

    async fn read_all(&mut self) -> io::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Scaled-down timings: 100ms / 140ms writers, 200ms reader.
pub fn fast_config(run_window: Duration) -> Config {
    Config {
        run_window,
        even_pause: Duration::from_millis(100),
        odd_pause: Duration::from_millis(140),
        observer_pause: Duration::from_millis(200),
        bus_capacity: 4096,
        ..Config::default()
    }
}

/// Everything currently buffered in `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(ev) => out.push(ev),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    out
}

/// Waits (bounded) for the next event of `kind`, skipping others.
pub async fn next_of(rx: &mut broadcast::Receiver<Event>, kind: EventKind) -> Event {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match rx.recv().await {
                Ok(ev) if ev.kind == kind => return ev,
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => panic!("bus closed"),
            }
        }
    })
    .await
    .expect("event did not arrive in time")
}

pub fn of_kind(events: &[Event], kind: EventKind) -> Vec<&Event> {
    events.iter().filter(|e| e.kind == kind).collect()
}
