//! # Event subscribers for the parityvisor runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out,
//! and the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   tasks/supervisor ── publish(Event) ──► Bus ──► event listener
//!                                                      │
//!                                                      ▼
//!                                               SubscriberSet::emit
//!                                                 ┌────┴────┐
//!                                                 ▼         ▼
//!                                             LogWriter   Custom
//! ```

mod log;
mod subscriber;
mod subscriber_set;

pub use log::LogWriter;
pub use subscriber::Subscribe;
pub use subscriber_set::SubscriberSet;
