use std::sync::Arc;

use super::{
    alive::AliveTracker,
    config::Config,
    supervisor::{Listener, Supervisor},
};
use crate::{
    error::RuntimeError,
    events::Bus,
    store::{FileSink, Gate, SharedStore, Sink},
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`Supervisor`].
pub struct SupervisorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    sink: Option<Box<dyn Sink>>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            sink: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Backs the store with `sink` instead of a [`FileSink`] at `cfg.store_path`.
    pub fn with_sink(mut self, sink: impl Sink) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Validates the config and wires the runtime components.
    ///
    /// Must be called from within a tokio runtime (subscriber workers are spawned here).
    pub fn build(self) -> Result<Supervisor, RuntimeError> {
        self.cfg.validate()?;

        let sink = match self.sink {
            Some(sink) => sink,
            None => Box::new(FileSink::new(self.cfg.store_path.clone())),
        };
        let gate = Gate::new(SharedStore::from_boxed(sink));

        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let listener = Listener::spawn(&bus, subs);
        let alive = Arc::new(AliveTracker::new());

        Ok(Supervisor::new_internal(self.cfg, bus, gate, alive, listener))
    }
}
