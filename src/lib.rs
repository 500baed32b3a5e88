//! # parityvisor
//!
//! Two writers and one reader share a single append-only store for a fixed
//! run window, then stop cooperatively.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ even-writer  │   │  odd-writer  │   │ tail-reader  │
//!     │ 0..=98, 500ms│   │ 1..=99, 700ms│   │ last 5, 1s   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ append           │ append           │ read_all
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Gate (tokio Mutex) ──► SharedStore ──► Sink (file / memory)      │
//! └───────────────────────────────────────────────────────────────────┘
//!            │                  │                  │
//!            │ ValueWritten     │ ValueWritten     │ TailRead / StoreEmpty
//!            │ StoreFailed      │ StoreFailed      │ StoreFailed
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                        listener ──► SubscriberSet ──► LogWriter (tracing)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Supervisor::run()
//!   ├─► reset store (fatal on failure)
//!   ├─► spawn writers + reader, each with a child CancellationToken
//!   ├─► wait run window (10s; a process signal cuts it short)
//!   ├─► cancel ─► tasks exit at loop top or mid-pause
//!   ├─► join all, no timeout
//!   └─► smoke check: store must be non-empty
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types                                  |
//! |-------------------|-----------------------------------------------------------|--------------------------------------------|
//! | **Store**         | Append-only tokens behind one gate.                       | [`Gate`], [`SharedStore`], [`Sink`]        |
//! | **Tasks**         | Parity writers and the tail reader.                       | [`Producer`], [`TailObserver`], [`Task`]   |
//! | **Supervision**   | Time-bounded run with cooperative cancellation.           | [`Supervisor`], [`RunReport`]              |
//! | **Events**        | Structured runtime events and fan-out.                    | [`Event`], [`Bus`], [`Subscribe`]          |
//! | **Errors**        | Typed errors for runtime, store and tasks.                | [`RuntimeError`], [`StoreError`]           |
//! | **Configuration** | Intervals, window and ranges, validated.                  | [`Config`]                                 |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use parityvisor::{Config, LogWriter, Subscribe, Supervisor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
//!     let sup = Supervisor::builder(Config::default())
//!         .with_subscribers(subs)
//!         .build()?;
//!
//!     let report = sup.run().await?;
//!     println!("{} values in numbers.txt", report.len());
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod store;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use core::{AliveTracker, Config, RunReport, Supervisor, SupervisorBuilder, TaskState};
pub use error::{RuntimeError, StoreError, TaskError};
pub use events::{Bus, Event, EventKind, Severity};
pub use store::{
    join_tokens, parse_tokens, FileSink, Gate, GateGuard, MemorySink, Parity, SharedStore, Sink,
    Token, MAX_VALUE_SLOTS,
};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use tasks::{
    tail, BoxTaskFuture, Producer, TailObserver, Task, TaskRef, DEFAULT_TAIL_LEN,
    DEFAULT_VALUE_SLOTS,
};
