//! # Task abstraction.
//!
//! This module defines the [`Task`] trait (async, cancelable). The common handle
//! type is [`TaskRef`], an `Arc<dyn Task>` suitable for sharing across the runtime.
//!
//! A task receives a [`CancellationToken`] and must check it at its checkpoints
//! (loop top and pause) to stop cooperatively.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Boxed future returned by [`Task::spawn`].
pub type BoxTaskFuture = Pin<Box<dyn Future<Output = Result<(), TaskError>> + Send + 'static>>;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancelable unit.
///
/// A `Task` has a stable [`name`](Task::name) and creates its loop future in
/// [`spawn`](Task::spawn). Everything the loop touches (gate, bus, random
/// source) is moved into that future.
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Creates the future that runs the task loop until cancellation.
    ///
    /// Implementations should return `Err(TaskError::Canceled)` once they
    /// observe `ctx`.
    fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture;
}
