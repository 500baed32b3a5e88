//! # Logging subscriber backed by `tracing`.
//!
//! [`LogWriter`] renders every runtime event as one `tracing` event at the
//! event's [`Severity`], with the logical timestamp and payload as fields.
//!
//! ## Output format (fmt layer)
//! ```text
//! INFO parityvisor: even-writer wrote 42 seq=12 task="even-writer" value=42
//! INFO parityvisor: tail-reader read last values: 42 7 seq=14 task="tail-reader" tail="42 7"
//! ERROR parityvisor: odd-writer: store operation failed: append failed: disk full seq=20 ...
//! WARN parityvisor: run window interrupted: shutdown signal seq=31
//! ```

use async_trait::async_trait;

use crate::events::{Event, Severity};
use crate::store::join_tokens;
use crate::subscribers::Subscribe;

/// Structured logging subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let message = e.message();
        let task = e.task.as_deref().unwrap_or("");
        let tail = e.tail.as_deref().map(join_tokens);

        match e.severity() {
            Severity::Info => tracing::info!(
                seq = e.seq,
                task,
                value = e.value,
                tail = tail.as_deref(),
                delay_ms = e.delay_ms,
                "{message}"
            ),
            Severity::Warn => tracing::warn!(
                seq = e.seq,
                task,
                reason = e.reason.as_deref(),
                "{message}"
            ),
            Severity::Error => tracing::error!(
                seq = e.seq,
                task,
                reason = e.reason.as_deref(),
                "{message}"
            ),
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }

    fn queue_capacity(&self) -> usize {
        4096
    }
}
