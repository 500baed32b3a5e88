//! # Backing media for the shared store.
//!
//! [`Sink`] is the append-capable byte medium under [`SharedStore`](super::SharedStore).
//! Two implementations ship with the crate:
//! - [`FileSink`] a flat file, opened in append mode for every write;
//! - [`MemorySink`] an in-process buffer.
//!
//! Sinks are owned by the store, which is owned by the gate, so no sink
//! method is ever called concurrently.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Append-capable byte medium.
#[async_trait]
pub trait Sink: Send + 'static {
    /// Truncates the medium to empty.
    async fn reset(&mut self) -> io::Result<()>;

    /// Appends `bytes` at the end of the medium.
    async fn append(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Returns the whole current content.
    async fn read_all(&mut self) -> io::Result<Vec<u8>>;
}

/// Flat-file sink.
///
/// A missing file reads as empty; it is created on reset or on first append.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Sink for FileSink {
    async fn reset(&mut self) -> io::Result<()> {
        fs::File::create(&self.path).await.map(drop)
    }

    async fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await
    }

    async fn read_all(&mut self) -> io::Result<Vec<u8>> {
        match fs::read(&self.path).await {
            Ok(buf) => Ok(buf),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory sink.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    buf: Vec<u8>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn reset(&mut self) -> io::Result<()> {
        self.buf.clear();
        Ok(())
    }

    async fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    async fn read_all(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.buf.clone())
    }
}
