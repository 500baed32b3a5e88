//! # Task lifecycle tracker.
//!
//! Records where each supervised task is in its lifecycle:
//! ```text
//! Running ──(supervisor cancels)──► CancelRequested ──(task exits)──► Terminated
//!    └──────────────────(task exits on its own)─────────────────────────┘
//! ```
//!
//! ## Rules
//! - `Terminated` is final; later marks are ignored.
//! - The supervisor and runner update the tracker directly, so reads are
//!   consistent with the join: once `Supervisor::run` returns, every task
//!   reads `Terminated`.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// Lifecycle state of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    CancelRequested,
    Terminated,
}

/// Thread-safe map of task name to [`TaskState`].
#[derive(Debug, Default)]
pub struct AliveTracker {
    state: RwLock<HashMap<String, TaskState>>,
}

impl AliveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `name` to `next`. Returns `false` if the task was already terminated.
    pub async fn mark(&self, name: &str, next: TaskState) -> bool {
        let mut state = self.state.write().await;
        match state.get(name) {
            Some(TaskState::Terminated) => false,
            _ => {
                state.insert(name.to_string(), next);
                true
            }
        }
    }

    /// Moves every task still running to `CancelRequested`.
    pub async fn request_cancel_all(&self) {
        let mut state = self.state.write().await;
        for s in state.values_mut() {
            if *s == TaskState::Running {
                *s = TaskState::CancelRequested;
            }
        }
    }

    pub async fn state(&self, name: &str) -> Option<TaskState> {
        self.state.read().await.get(name).copied()
    }

    /// Returns `(name, state)` pairs sorted by name.
    pub async fn snapshot(&self) -> Vec<(String, TaskState)> {
        let state = self.state.read().await;
        let mut all: Vec<(String, TaskState)> =
            state.iter().map(|(n, s)| (n.clone(), *s)).collect();
        all.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Returns true if task is running or asked to stop but not yet gone.
    #[cfg(test)]
    pub(crate) async fn is_alive(&self, name: &str) -> bool {
        matches!(
            self.state(name).await,
            Some(TaskState::Running | TaskState::CancelRequested)
        )
    }
}
