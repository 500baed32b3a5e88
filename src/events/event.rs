//! # Runtime events emitted by the supervisor and its tasks.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Store events**: what producers wrote, what the observer read, store failures
//! - **Task lifecycle events**: starting, stopped, failed
//! - **Run events**: reset, run window, cancellation, join, smoke check
//! - **Subscriber events**: overflow and panics in the fan-out
//!
//! The [`Event`] struct carries metadata such as the logical timestamp, task name,
//! value, observed tail, and reason. [`Event::severity`] tells log sinks how loud
//! each event is.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use parityvisor::{Event, EventKind, Severity};
//!
//! let ev = Event::new(EventKind::StoreFailed)
//!     .with_task("even-writer")
//!     .with_reason("append failed: disk full");
//!
//! assert_eq!(ev.severity(), Severity::Error);
//! assert_eq!(ev.task.as_deref(), Some("even-writer"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::store::{join_tokens, Token};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Store events ===
    /// A producer appended a value.
    ///
    /// Sets:
    /// - `task`: producer name
    /// - `value`: the value written
    ValueWritten,

    /// The observer read a non-empty store.
    ///
    /// Sets:
    /// - `task`: observer name
    /// - `tail`: last `min(tail_len, len)` tokens, in stored order
    TailRead,

    /// The observer read an empty store ("nothing to read yet").
    ///
    /// Sets:
    /// - `task`: observer name
    StoreEmpty,

    /// A store operation failed; the task continues with its next iteration.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `reason`: error message
    StoreFailed,

    // === Task lifecycle events ===
    /// Task started running.
    ///
    /// Sets:
    /// - `task`: task name
    TaskStarting,

    /// Task exited cleanly (finished or cancelled).
    ///
    /// Sets:
    /// - `task`: task name
    TaskStopped,

    /// Task exited with an error or panicked.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `reason`: failure message
    TaskFailed,

    // === Run events ===
    /// Store was cleared before launch.
    StoreReset,

    /// Run window was cut short by a process signal.
    ///
    /// Sets:
    /// - `reason`: what happened
    RunWindowInterrupted,

    /// Signal listeners could not be installed; the run window is waited out.
    ///
    /// Sets:
    /// - `reason`: registration error
    SignalsUnavailable,

    /// Supervisor signalled cancellation to all tasks.
    ///
    /// Sets:
    /// - `delay_ms`: how long the run window lasted
    CancelRequested,

    /// All tasks joined.
    ///
    /// Sets:
    /// - `delay_ms`: time from cancellation to the last join
    AllStopped,

    /// Store was non-empty after the run.
    ///
    /// Sets:
    /// - `value`: number of tokens in the store
    SmokeCheckPassed,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: panic message
    SubscriberPanicked,

    /// The bus listener fell behind and the ring buffer overwrote events
    /// before they reached any subscriber.
    ///
    /// Sets:
    /// - `value`: number of events lost
    /// - `reason`: what happened
    ListenerLagged,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: "full" or "closed"
    SubscriberOverflow,
}

/// How loud an event is in the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence (logical timestamp)
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the emitting task or subscriber, if applicable.
    pub task: Option<Arc<str>>,
    /// Written value, or token count for the smoke check.
    pub value: Option<u32>,
    /// Observed store tail.
    pub tail: Option<Arc<[Token]>>,
    /// Duration in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            value: None,
            tail: None,
            delay_ms: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    #[inline]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    #[inline]
    pub fn with_tail(mut self, tail: &[Token]) -> Self {
        self.tail = Some(Arc::from(tail));
        self
    }

    /// Attaches a duration (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }

    /// Creates a listener lag warning for `lost` skipped events.
    pub fn listener_lagged(lost: u64) -> Self {
        Event::new(EventKind::ListenerLagged)
            .with_value(u32::try_from(lost).unwrap_or(u32::MAX))
            .with_reason(format!("listener lagged, {lost} events lost"))
    }

    /// Severity of this event.
    pub fn severity(&self) -> Severity {
        match self.kind {
            EventKind::StoreFailed | EventKind::TaskFailed | EventKind::SubscriberPanicked => {
                Severity::Error
            }
            EventKind::RunWindowInterrupted
            | EventKind::SignalsUnavailable
            | EventKind::ListenerLagged
            | EventKind::SubscriberOverflow => Severity::Warn,
            _ => Severity::Info,
        }
    }

    /// Human-readable one-line message.
    pub fn message(&self) -> String {
        let task = self.task.as_deref().unwrap_or("-");
        let reason = self.reason.as_deref().unwrap_or("unknown");
        match self.kind {
            EventKind::ValueWritten => match self.value {
                Some(v) => format!("{task} wrote {v}"),
                None => format!("{task} wrote a value"),
            },
            EventKind::TailRead => {
                let tail = self.tail.as_deref().map(join_tokens).unwrap_or_default();
                format!("{task} read last values: {tail}")
            }
            EventKind::StoreEmpty => format!("{task}: store is empty, nothing to read yet"),
            EventKind::StoreFailed => format!("{task}: store operation failed: {reason}"),
            EventKind::TaskStarting => format!("{task} starting"),
            EventKind::TaskStopped => format!("{task} stopped"),
            EventKind::TaskFailed => format!("{task} failed: {reason}"),
            EventKind::StoreReset => "store reset".to_string(),
            EventKind::RunWindowInterrupted => format!("run window interrupted: {reason}"),
            EventKind::SignalsUnavailable => format!("signal listeners unavailable: {reason}"),
            EventKind::CancelRequested => "cancellation requested".to_string(),
            EventKind::AllStopped => "all tasks stopped".to_string(),
            EventKind::SmokeCheckPassed => "smoke check passed: store is not empty".to_string(),
            EventKind::SubscriberPanicked => format!("subscriber {task} panicked: {reason}"),
            EventKind::ListenerLagged => reason.to_string(),
            EventKind::SubscriberOverflow => format!("subscriber {task} dropped event: {reason}"),
        }
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}
