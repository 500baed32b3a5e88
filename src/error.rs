//! Error types used by the parityvisor runtime, its store and its tasks.
//!
//! This module defines three enums:
//!
//! - [`RuntimeError`]: startup and final-verification failures; these end the run.
//! - [`StoreError`]: a single store operation failed; callers log it and keep looping.
//! - [`TaskError`]: the outcome of one task's loop.
//!
//! All of them provide `as_label` (stable snake_case label for logs).

use std::io;
use std::time::Duration;

use thiserror::Error;

/// # Errors produced by the parityvisor runtime.
///
/// Any of these aborts [`Supervisor::run`](crate::Supervisor::run).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration rejected by [`Config::validate`](crate::Config::validate).
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },

    /// The backing store could not be cleared before launch.
    #[error("cannot reset store: {source}")]
    StoreReset {
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },

    /// The store could not be read for the post-run check.
    #[error("store unavailable for smoke check: {source}")]
    StoreUnavailable {
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },

    /// The store was still empty after the full run window.
    #[error("smoke check failed: store is empty after {run_window:?}")]
    SmokeCheckFailed {
        /// The configured run window.
        run_window: Duration,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use parityvisor::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::SmokeCheckFailed { run_window: Duration::from_secs(10) };
    /// assert_eq!(err.as_label(), "runtime_smoke_check_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::InvalidConfig { .. } => "runtime_invalid_config",
            RuntimeError::StoreReset { .. } => "runtime_store_reset",
            RuntimeError::StoreUnavailable { .. } => "runtime_store_unavailable",
            RuntimeError::SmokeCheckFailed { .. } => "runtime_smoke_check_failed",
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        RuntimeError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// # Errors produced by a single store operation.
///
/// These are transient from the runtime's point of view: the task that hit
/// one publishes a `StoreFailed` event and continues with its next iteration.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing medium failed.
    #[error("{op} failed: {source}")]
    Io {
        /// Operation that failed (`reset`, `append`, `read`).
        op: &'static str,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Stored content held something other than a decimal integer.
    #[error("malformed token {fragment:?}")]
    Malformed {
        /// The offending fragment.
        fragment: String,
    },
}

impl StoreError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "store_io",
            StoreError::Malformed { .. } => "store_malformed",
        }
    }

    pub(crate) fn io(op: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| StoreError::Io { op, source }
    }
}

/// # Outcome of a task loop.
///
/// Tasks exit with [`TaskError::Canceled`] once they observe cancellation;
/// the runner treats that as a graceful stop.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task stopped because of an error it could not handle locally.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task observed its cancellation token and exited.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use parityvisor::TaskError;
    ///
    /// assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }
}

/// Text of a caught panic payload (`&str` or `String`), for event reasons.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
