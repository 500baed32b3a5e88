//! # TailObserver: periodically reports the newest tokens.
//!
//! Every iteration re-reads the whole store under the gate instead of
//! tracking an offset, then reports the last `tail_len` tokens.
//!
//! ## Loop
//! ```text
//! loop {
//!   ├─► ctx cancelled? ─► exit
//!   ├─► gate.acquire() ─► store.read_all() ─► guard dropped (release)
//!   │       ├─ Ok([])     ─► publish StoreEmpty
//!   │       ├─ Ok(tokens) ─► publish TailRead{ tail = last min(k, len) }
//!   │       └─ Err        ─► publish StoreFailed   (loop continues)
//!   └─► select! { sleep(pause), ctx.cancelled() ─► exit }
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::store::{Gate, Token};
use crate::tasks::task::{BoxTaskFuture, Task};

/// Default number of tokens reported per read.
pub const DEFAULT_TAIL_LEN: usize = 5;

/// Returns the last `min(k, tokens.len())` tokens, in stored order.
///
/// # Example
/// ```
/// use parityvisor::{tail, Token};
///
/// let tokens: Vec<Token> = (1..=7).map(Token::new).collect();
/// let last: Vec<u32> = tail(&tokens, 5).iter().map(|t| t.value()).collect();
/// assert_eq!(last, vec![3, 4, 5, 6, 7]);
/// assert_eq!(tail(&tokens[..2], 5).len(), 2);
/// ```
pub fn tail(tokens: &[Token], k: usize) -> &[Token] {
    &tokens[tokens.len().saturating_sub(k)..]
}

/// Task reporting the tail of the shared store.
#[derive(Debug)]
pub struct TailObserver {
    pause: Duration,
    tail_len: usize,
    gate: Gate,
    bus: Bus,
}

impl TailObserver {
    pub fn new(pause: Duration, gate: Gate, bus: Bus) -> Self {
        Self {
            pause,
            tail_len: DEFAULT_TAIL_LEN,
            gate,
            bus,
        }
    }

    /// Overrides how many tokens each report carries (at least 1).
    pub fn with_tail_len(mut self, tail_len: usize) -> Self {
        self.tail_len = tail_len.max(1);
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Task for TailObserver {
    fn name(&self) -> &str {
        "tail-reader"
    }

    fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture {
        let name: Arc<str> = Arc::from(self.name());
        let pause = self.pause;
        let tail_len = self.tail_len;
        let gate = self.gate.clone();
        let bus = self.bus.clone();

        Box::pin(async move {
            loop {
                if ctx.is_cancelled() {
                    break;
                }

                let res = {
                    let mut store = gate.acquire().await;
                    store.read_all().await
                };
                let ev = match res {
                    Ok(tokens) if tokens.is_empty() => Event::new(EventKind::StoreEmpty),
                    Ok(tokens) => Event::new(EventKind::TailRead).with_tail(tail(&tokens, tail_len)),
                    Err(e) => Event::new(EventKind::StoreFailed).with_reason(e.to_string()),
                };
                bus.publish(ev.with_task(Arc::clone(&name)));

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
