//! # Append-only token store.
//!
//! [`SharedStore`] turns a [`Sink`] into an ordered sequence of [`Token`]s.
//! Every mutating or reading method takes `&mut self`; the only way to get
//! that borrow from a task is through the [`Gate`](super::Gate) guard, so
//! appends never interleave and reads never see a half-written token.

use crate::error::StoreError;
use crate::store::sink::Sink;
use crate::store::token::{parse_tokens, Token};

/// Ordered, append-only token sequence over a backing sink.
pub struct SharedStore {
    sink: Box<dyn Sink>,
}

impl SharedStore {
    pub fn new(sink: impl Sink) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Wraps an already boxed sink.
    pub fn from_boxed(sink: Box<dyn Sink>) -> Self {
        Self { sink }
    }

    /// Truncates the store to empty.
    pub async fn reset(&mut self) -> Result<(), StoreError> {
        self.sink.reset().await.map_err(StoreError::io("reset"))
    }

    /// Appends one token followed by a single space.
    pub async fn append(&mut self, token: Token) -> Result<(), StoreError> {
        let text = format!("{token} ");
        self.sink
            .append(text.as_bytes())
            .await
            .map_err(StoreError::io("append"))
    }

    /// Reads and decodes the whole store.
    pub async fn read_all(&mut self) -> Result<Vec<Token>, StoreError> {
        let bytes = self.sink.read_all().await.map_err(StoreError::io("read"))?;
        let text = String::from_utf8_lossy(&bytes);
        parse_tokens(&text)
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore").finish_non_exhaustive()
    }
}
