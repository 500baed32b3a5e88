//! # Outcome of a successful run.

use std::time::Duration;

use crate::store::{Parity, Token};

/// What the store held after the run, and how long shutdown took.
#[derive(Debug, Clone)]
pub struct RunReport {
    tokens: Vec<Token>,
    shutdown_latency: Duration,
}

impl RunReport {
    pub(crate) fn new(tokens: Vec<Token>, shutdown_latency: Duration) -> Self {
        Self {
            tokens,
            shutdown_latency,
        }
    }

    /// Final store content, in append order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of stored tokens with the given parity.
    pub fn count(&self, parity: Parity) -> usize {
        self.tokens.iter().filter(|t| t.parity() == parity).count()
    }

    /// Time from the cancellation signal to the last task joining.
    pub fn shutdown_latency(&self) -> Duration {
        self.shutdown_latency
    }

    /// [`shutdown_latency`](Self::shutdown_latency) in whole milliseconds, saturating.
    pub fn shutdown_ms(&self) -> u64 {
        u64::try_from(self.shutdown_latency.as_millis()).unwrap_or(u64::MAX)
    }
}
