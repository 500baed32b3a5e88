//! # Task abstractions and the three run tasks.
//!
//! This module provides:
//! - [`Task`] - trait for async cancelable tasks
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`Producer`] - even/odd writers
//! - [`TailObserver`] - the tail reader, plus the pure [`tail`] helper

mod observer;
mod producer;
mod task;

pub use observer::{tail, TailObserver, DEFAULT_TAIL_LEN};
pub use producer::{Producer, DEFAULT_VALUE_SLOTS};
pub use task::{BoxTaskFuture, Task, TaskRef};
