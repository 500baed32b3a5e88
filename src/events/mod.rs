//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the supervisor, the runner,
//! the producers, the observer and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`Severity`] event classification and payload
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor`, `core::runner`, `Producer`, `TailObserver`,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the supervisor's event listener (fans out to `SubscriberSet`),
//!   and anyone holding a receiver from [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, Severity};
