//! Shared store: tokens, backing sinks, and the gate.
//!
//! ## Contents
//! - [`Token`], [`Parity`] the stored values and their category
//! - [`Sink`] append-capable medium ([`FileSink`], [`MemorySink`])
//! - [`SharedStore`] append-only token sequence over a sink
//! - [`Gate`] the one lock every store access goes through
//!
//! ## Quick wiring
//! ```text
//! Supervisor::builder().with_sink(sink)
//!      └─► Gate::new(SharedStore::new(sink))
//!           └─► cloned into every producer/observer
//! ```

mod gate;
mod shared;
mod sink;
mod token;

pub use gate::{Gate, GateGuard};
pub use shared::SharedStore;
pub use sink::{FileSink, MemorySink, Sink};
pub use token::{join_tokens, parse_tokens, Parity, Token, MAX_VALUE_SLOTS};
