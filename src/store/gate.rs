//! # The gate: single lock around the shared store.
//!
//! [`Gate`] owns the [`SharedStore`] behind a [`tokio::sync::Mutex`]. Tasks
//! get at the store only through [`Gate::acquire`]; the returned guard
//! releases the gate when dropped, on every exit path including `?` and
//! failed I/O.
//!
//! ```text
//! even-writer ─┐
//! odd-writer  ─┼──► Gate::acquire() ──► GateGuard (&mut SharedStore) ──► drop → release
//! tail-reader ─┘
//! ```
//!
//! Waiters are served in whatever order the mutex grants; no fairness
//! between producers is promised.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::store::shared::SharedStore;

/// Exclusive access to the store, held until dropped.
pub type GateGuard<'a> = MutexGuard<'a, SharedStore>;

/// Cloneable handle to the single store lock.
#[derive(Clone, Debug)]
pub struct Gate {
    inner: Arc<Mutex<SharedStore>>,
}

impl Gate {
    pub fn new(store: SharedStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Waits until the gate is free and takes it.
    ///
    /// Not raced against cancellation: a task that started waiting
    /// finishes the acquisition and its critical section first.
    pub async fn acquire(&self) -> GateGuard<'_> {
        self.inner.lock().await
    }

    /// Takes the gate only if nobody holds it.
    #[cfg(test)]
    pub(crate) fn try_acquire(&self) -> Option<GateGuard<'_>> {
        self.inner.try_lock().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemorySink, Token};

    #[tokio::test]
    async fn guard_drop_releases_gate() {
        let gate = Gate::new(SharedStore::new(MemorySink::new()));
        {
            let _held = gate.acquire().await;
            assert!(gate.try_acquire().is_none());
        }
        assert!(gate.try_acquire().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_never_interleave() {
        let gate = Gate::new(SharedStore::new(MemorySink::new()));

        let mut handles = Vec::new();
        for w in 0..8u32 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50u32 {
                    let mut store = gate.acquire().await;
                    store.append(Token::new(w * 1000 + i)).await.unwrap();
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let tokens = gate.acquire().await.read_all().await.unwrap();
        assert_eq!(tokens.len(), 8 * 50);

        // Per-writer order is preserved and every token appears exactly once.
        for w in 0..8u32 {
            let mine: Vec<u32> = tokens
                .iter()
                .map(|t| t.value())
                .filter(|v| v / 1000 == w)
                .collect();
            let expected: Vec<u32> = (0..50).map(|i| w * 1000 + i).collect();
            assert_eq!(mine, expected);
        }
    }
}
