//! # Supervisor: owns one time-bounded run of the writers and the reader.
//!
//! The [`Supervisor`] owns the event bus, the gate around the shared store,
//! the lifecycle tracker and the event listener feeding the [`SubscriberSet`].
//!
//! ## Lifecycle
//! ```text
//! run()
//!   ├─► gate: store.reset()                    ─ Err ─► RuntimeError::StoreReset
//!   ├─► spawn into JoinSet (child tokens):
//!   │     even-writer   odd-writer   tail-reader
//!   ├─► select! { sleep(run_window), shutdown signal ─► RunWindowInterrupted }
//!   ├─► publish CancelRequested, mark CancelRequested, token.cancel()
//!   ├─► join all (no timeout)                  ─► AllStopped{ latency }
//!   ├─► gate: store.read_all()
//!   │     ├─ Err   ─► RuntimeError::StoreUnavailable
//!   │     ├─ empty ─► RuntimeError::SmokeCheckFailed
//!   │     └─ ok    ─► SmokeCheckPassed, RunReport
//!   └─► stop listener, flush subscribers
//! ```
//!
//! Shutdown latency is bounded by the longest pause plus one gate wait: every
//! task checks its token at the loop top and races it against its pause.
//! A task stuck inside an uncancellable call would hang the join; that is
//! accepted, there is no grace timeout.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use parityvisor::{Config, LogWriter, MemorySink, Subscribe, Supervisor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
//!     let sup = Supervisor::builder(Config::default())
//!         .with_subscribers(subs)
//!         .with_sink(MemorySink::new())
//!         .build()?;
//!
//!     let report = sup.run().await?;
//!     println!("{} values written", report.len());
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::task::{JoinHandle, JoinSet};
use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::core::{
    alive::{AliveTracker, TaskState},
    builder::SupervisorBuilder,
    config::Config,
    report::RunReport,
    runner::run_task,
    shutdown,
};
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::store::Gate;
use crate::subscribers::SubscriberSet;
use crate::tasks::{Producer, TailObserver, TaskRef};

/// Forwards bus events to the subscriber set until stopped.
pub(crate) struct Listener {
    stop: CancellationToken,
    handle: JoinHandle<()>,
}

impl Listener {
    /// Spawns the forwarding loop. Must be called from within a tokio runtime.
    pub(crate) fn spawn(bus: &Bus, subs: SubscriberSet) -> Self {
        let mut rx = bus.subscribe();
        let stop = CancellationToken::new();
        let token = stop.clone();

        let handle = tokio::spawn(async move {
            loop {
                select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Ok(ev) => subs.emit(&ev),
                        Err(RecvError::Lagged(n)) => subs.emit(&Event::listener_lagged(n)),
                        Err(RecvError::Closed) => break,
                    },
                    _ = token.cancelled() => break,
                }
            }
            loop {
                match rx.try_recv() {
                    Ok(ev) => subs.emit(&ev),
                    Err(TryRecvError::Lagged(n)) => subs.emit(&Event::listener_lagged(n)),
                    Err(_) => break,
                }
            }
            subs.shutdown().await;
        });
        Self { stop, handle }
    }

    /// Drains pending events and waits for subscribers to handle them.
    async fn finish(self) {
        self.stop.cancel();
        let _ = self.handle.await;
    }
}

/// Coordinates the writers, the reader, and the run lifecycle.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    gate: Gate,
    alive: Arc<AliveTracker>,
    listener: Listener,
}

impl Supervisor {
    /// Returns a builder with the given configuration.
    pub fn builder(cfg: Config) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        gate: Gate,
        alive: Arc<AliveTracker>,
        listener: Listener,
    ) -> Self {
        Self {
            cfg,
            bus,
            gate,
            alive,
            listener,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Event bus; subscribe before [`run`](Self::run) to see the whole stream.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Handle to the gate guarding the store.
    pub fn gate(&self) -> Gate {
        self.gate.clone()
    }

    /// Lifecycle tracker; stays readable after the run.
    pub fn alive(&self) -> Arc<AliveTracker> {
        Arc::clone(&self.alive)
    }

    /// Executes one full run and reports the final store content.
    pub async fn run(self) -> Result<RunReport, RuntimeError> {
        let res = self.drive().await;
        self.listener.finish().await;
        res
    }

    async fn drive(&self) -> Result<RunReport, RuntimeError> {
        self.reset_store().await?;

        let token = CancellationToken::new();
        let mut set = JoinSet::new();
        self.spawn_tasks(&mut set, &token).await;

        let opened = Instant::now();
        self.wait_run_window().await;

        self.bus
            .publish(Event::new(EventKind::CancelRequested).with_delay(opened.elapsed()));
        self.alive.request_cancel_all().await;
        let cancelled_at = Instant::now();
        token.cancel();

        self.join_all(&mut set).await;
        let latency = cancelled_at.elapsed();
        self.bus
            .publish(Event::new(EventKind::AllStopped).with_delay(latency));

        self.smoke_check(latency).await
    }

    /// Clears the store before any task starts.
    async fn reset_store(&self) -> Result<(), RuntimeError> {
        let mut store = self.gate.acquire().await;
        store
            .reset()
            .await
            .map_err(|source| RuntimeError::StoreReset { source })?;
        self.bus.publish(Event::new(EventKind::StoreReset));
        Ok(())
    }

    /// The two writers and the reader, wired to this supervisor's gate and bus.
    fn tasks(&self) -> Vec<TaskRef> {
        let cfg = &self.cfg;
        let even: TaskRef = Producer::even(cfg.even_pause, self.gate.clone(), self.bus.clone())
            .with_slots(cfg.value_slots)
            .arc();
        let odd: TaskRef = Producer::odd(cfg.odd_pause, self.gate.clone(), self.bus.clone())
            .with_slots(cfg.value_slots)
            .arc();
        let reader: TaskRef =
            TailObserver::new(cfg.observer_pause, self.gate.clone(), self.bus.clone())
                .with_tail_len(cfg.tail_len)
                .arc();
        vec![even, odd, reader]
    }

    async fn spawn_tasks(&self, set: &mut JoinSet<()>, runtime_token: &CancellationToken) {
        for task in self.tasks() {
            self.alive.mark(task.name(), TaskState::Running).await;
            set.spawn(run_task(
                task,
                runtime_token.child_token(),
                self.bus.clone(),
                Arc::clone(&self.alive),
            ));
        }
    }

    /// Sleeps for the run window; only a process signal ends it early.
    async fn wait_run_window(&self) {
        let window = time::sleep(self.cfg.run_window);
        tokio::pin!(window);

        select! {
            _ = &mut window => {}
            res = shutdown::wait_for_shutdown_signal() => match res {
                Ok(signal) => self.bus.publish(
                    Event::new(EventKind::RunWindowInterrupted)
                        .with_reason(format!("{signal} received")),
                ),
                Err(e) => {
                    self.bus.publish(
                        Event::new(EventKind::SignalsUnavailable).with_reason(e.to_string()),
                    );
                    window.await;
                }
            }
        }
    }

    /// Waits for every task, with no timeout.
    async fn join_all(&self, set: &mut JoinSet<()>) {
        while let Some(res) = set.join_next().await {
            if let Err(e) = res {
                self.bus
                    .publish(Event::new(EventKind::TaskFailed).with_reason(e.to_string()));
            }
        }
    }

    /// Fails the run if nothing was written.
    async fn smoke_check(&self, latency: Duration) -> Result<RunReport, RuntimeError> {
        let tokens = {
            let mut store = self.gate.acquire().await;
            store
                .read_all()
                .await
                .map_err(|source| RuntimeError::StoreUnavailable { source })?
        };
        if tokens.is_empty() {
            return Err(RuntimeError::SmokeCheckFailed {
                run_window: self.cfg.run_window,
            });
        }
        self.bus.publish(
            Event::new(EventKind::SmokeCheckPassed)
                .with_value(u32::try_from(tokens.len()).unwrap_or(u32::MAX)),
        );
        Ok(RunReport::new(tokens, latency))
    }
}
