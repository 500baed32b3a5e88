//! Runtime core: run lifecycle and orchestration.
//!
//! The public API from this module is [`Supervisor`] (built via
//! [`SupervisorBuilder`]), its [`Config`], the [`RunReport`] it returns, and
//! the [`AliveTracker`] exposing per-task [`TaskState`].
//!
//! Internal modules:
//! - [`runner`]: runs one task, publishes its lifecycle events, marks it terminated;
//! - [`supervisor`]: reset, spawn, run window, cancel, join, smoke check;
//! - [`shutdown`]: process signal handling during the run window;
//! - [`alive`]: per-task lifecycle state.

mod alive;
mod builder;
mod config;
mod report;
mod runner;
mod shutdown;
mod supervisor;

pub use alive::{AliveTracker, TaskState};
pub use builder::SupervisorBuilder;
pub use config::Config;
pub use report::RunReport;
pub use supervisor::Supervisor;
