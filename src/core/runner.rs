//! # Run one supervised task to completion.
//!
//! Drives a [`Task`] future, publishes its lifecycle events to [`Bus`], and
//! records the terminal state in the [`AliveTracker`].
//!
//! ## Event flow
//! ```text
//! publish TaskStarting
//!   task.spawn(ctx) ─► Ok(()) / Err(Canceled) ─► publish TaskStopped
//!                   ─► Err(Fail)              ─► publish TaskFailed
//!                   ─► panic                  ─► publish TaskFailed (panic message)
//! mark Terminated
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** terminal event.
//! - `Canceled` is a graceful exit, not a failure.

use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::core::alive::{AliveTracker, TaskState};
use crate::error::{panic_message, TaskError};
use crate::events::{Bus, Event, EventKind};
use crate::tasks::TaskRef;

/// Runs `task` until it exits, then marks it terminated.
pub async fn run_task(
    task: TaskRef,
    ctx: CancellationToken,
    bus: Bus,
    alive: Arc<AliveTracker>,
) {
    let name = task.name();
    bus.publish(Event::new(EventKind::TaskStarting).with_task(name));

    let res = std::panic::AssertUnwindSafe(task.spawn(ctx))
        .catch_unwind()
        .await;

    match res {
        Ok(Ok(())) | Ok(Err(TaskError::Canceled)) => {
            bus.publish(Event::new(EventKind::TaskStopped).with_task(name));
        }
        Ok(Err(e)) => {
            bus.publish(
                Event::new(EventKind::TaskFailed)
                    .with_task(name)
                    .with_reason(e.to_string()),
            );
        }
        Err(payload) => {
            bus.publish(
                Event::new(EventKind::TaskFailed)
                    .with_task(name)
                    .with_reason(format!("panicked: {}", panic_message(&*payload))),
            );
        }
    }
    alive.mark(name, TaskState::Terminated).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{BoxTaskFuture, Task};

    struct Scripted {
        outcome: fn() -> Result<(), TaskError>,
    }

    impl Task for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }
        fn spawn(&self, _ctx: CancellationToken) -> BoxTaskFuture {
            let outcome = self.outcome;
            Box::pin(async move { outcome() })
        }
    }

    async fn run(outcome: fn() -> Result<(), TaskError>) -> (Vec<Event>, Arc<AliveTracker>) {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let alive = Arc::new(AliveTracker::new());
        alive.mark("scripted", TaskState::Running).await;

        run_task(
            Arc::new(Scripted { outcome }),
            CancellationToken::new(),
            bus,
            alive.clone(),
        )
        .await;

        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        (events, alive)
    }

    #[tokio::test]
    async fn canceled_is_a_clean_stop() {
        let (events, alive) = run(|| Err(TaskError::Canceled)).await;
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::TaskStarting, EventKind::TaskStopped]);
        assert_eq!(alive.state("scripted").await, Some(TaskState::Terminated));
    }

    #[tokio::test]
    async fn failure_is_reported_with_reason() {
        let (events, _) = run(|| {
            Err(TaskError::Fail {
                error: "boom".into(),
            })
        })
        .await;
        let last = events.last().unwrap();
        assert_eq!(last.kind, EventKind::TaskFailed);
        assert_eq!(last.reason.as_deref(), Some("execution failed: boom"));
    }

    #[tokio::test]
    async fn panic_is_caught_and_task_terminates() {
        let (events, alive) = run(|| panic!("kaboom")).await;
        let last = events.last().unwrap();
        assert_eq!(last.kind, EventKind::TaskFailed);
        assert_eq!(last.reason.as_deref(), Some("panicked: kaboom"));
        assert_eq!(alive.state("scripted").await, Some(TaskState::Terminated));
    }
}
