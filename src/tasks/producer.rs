//! # Producer: appends random values of one parity.
//!
//! ## Loop
//! ```text
//! loop {
//!   ├─► ctx cancelled? ─► exit
//!   ├─► token = parity.sample(rng)
//!   ├─► gate.acquire() ─► store.append(token) ─► guard dropped (release)
//!   │       ├─ Ok  ─► publish ValueWritten{ task, value }
//!   │       └─ Err ─► publish StoreFailed{ task, reason }   (loop continues)
//!   └─► select! { sleep(pause), ctx.cancelled() ─► exit }
//! }
//! ```
//!
//! The gate wait itself is not raced against cancellation; a producer that
//! is already queued on the gate finishes that append before it exits.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::store::{Gate, Parity, MAX_VALUE_SLOTS};
use crate::tasks::task::{BoxTaskFuture, Task};

/// Default number of distinct values per parity (`0..=98` / `1..=99`).
pub const DEFAULT_VALUE_SLOTS: u32 = 50;

/// Task writing values of a single parity into the shared store.
#[derive(Debug)]
pub struct Producer {
    name: Cow<'static, str>,
    parity: Parity,
    pause: Duration,
    slots: u32,
    seed: Option<u64>,
    gate: Gate,
    bus: Bus,
}

impl Producer {
    /// Creates a producer with an explicit name and parity.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        parity: Parity,
        pause: Duration,
        gate: Gate,
        bus: Bus,
    ) -> Self {
        Self {
            name: name.into(),
            parity,
            pause,
            slots: DEFAULT_VALUE_SLOTS,
            seed: None,
            gate,
            bus,
        }
    }

    /// The even writer (`even-writer`).
    pub fn even(pause: Duration, gate: Gate, bus: Bus) -> Self {
        Self::new("even-writer", Parity::Even, pause, gate, bus)
    }

    /// The odd writer (`odd-writer`).
    pub fn odd(pause: Duration, gate: Gate, bus: Bus) -> Self {
        Self::new("odd-writer", Parity::Odd, pause, gate, bus)
    }

    /// Overrides the number of distinct values (clamped to `1..=MAX_VALUE_SLOTS`).
    pub fn with_slots(mut self, slots: u32) -> Self {
        self.slots = slots.clamp(1, MAX_VALUE_SLOTS);
        self
    }

    /// Uses a deterministic random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Wraps the producer in a shared handle.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }
}

impl Task for Producer {
    fn name(&self) -> &str {
        &self.name
    }

    fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture {
        let name: Arc<str> = Arc::from(self.name.as_ref());
        let parity = self.parity;
        let pause = self.pause;
        let slots = self.slots;
        let gate = self.gate.clone();
        let bus = self.bus.clone();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Box::pin(async move {
            loop {
                if ctx.is_cancelled() {
                    break;
                }
                let token = parity.sample(&mut rng, slots);

                let res = {
                    let mut store = gate.acquire().await;
                    store.append(token).await
                };
                match res {
                    Ok(()) => bus.publish(
                        Event::new(EventKind::ValueWritten)
                            .with_task(Arc::clone(&name))
                            .with_value(token.value()),
                    ),
                    Err(e) => bus.publish(
                        Event::new(EventKind::StoreFailed)
                            .with_task(Arc::clone(&name))
                            .with_reason(e.to_string()),
                    ),
                }

                let sleep = time::sleep(pause);
                tokio::pin!(sleep);
                select! {
                    _ = &mut sleep => {}
                    _ = ctx.cancelled() => { break; }
                }
            }
            Err(TaskError::Canceled)
        })
    }
}
