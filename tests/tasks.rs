mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{drain, next_of, of_kind, FlakySink};
use parityvisor::{
    Bus, EventKind, Gate, MemorySink, Parity, Producer, SharedStore, TailObserver, Task, TaskError,
};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn observer_on_empty_store_reports_nothing_to_read() {
    let gate = Gate::new(SharedStore::new(MemorySink::new()));
    let bus = Bus::new(64);
    let mut rx = bus.subscribe();

    let ctx = CancellationToken::new();
    let observer = TailObserver::new(Duration::from_millis(50), gate, bus);
    let handle = tokio::spawn(observer.spawn(ctx.clone()));

    let first = next_of(&mut rx, EventKind::StoreEmpty).await;
    assert_eq!(first.task.as_deref(), Some("tail-reader"));

    ctx.cancel();
    assert!(matches!(handle.await.unwrap(), Err(TaskError::Canceled)));
    assert!(of_kind(&drain(&mut rx), EventKind::StoreFailed).is_empty());
}

#[tokio::test]
async fn single_failed_append_is_logged_and_producer_continues() {
    let sink = FlakySink::failing_appends([0]);
    let attempts = sink.attempts();
    let gate = Gate::new(SharedStore::new(sink));
    let bus = Bus::new(256);
    let mut rx = bus.subscribe();

    let ctx = CancellationToken::new();
    let producer = Producer::even(Duration::from_millis(20), gate.clone(), bus);
    let handle = tokio::spawn(producer.spawn(ctx.clone()));

    let failed = next_of(&mut rx, EventKind::StoreFailed).await;
    assert_eq!(failed.task.as_deref(), Some("even-writer"));
    assert!(failed
        .reason
        .as_deref()
        .unwrap()
        .contains("injected append failure"));

    for _ in 0..3 {
        next_of(&mut rx, EventKind::ValueWritten).await;
    }
    ctx.cancel();
    let _ = handle.await.unwrap();

    // Gate was released after the failure, and the store stayed well formed.
    let tokens = gate.acquire().await.read_all().await.unwrap();
    let written = 3 + of_kind(&drain(&mut rx), EventKind::ValueWritten).len();
    assert_eq!(tokens.len(), written);
    assert_eq!(attempts.load(Ordering::SeqCst), written + 1);
    assert!(tokens.iter().all(|t| t.parity() == Parity::Even));
}

#[tokio::test]
async fn cancellation_while_queued_on_gate_finishes_the_append() {
    let gate = Gate::new(SharedStore::new(MemorySink::new()));
    let held = gate.acquire().await;

    let ctx = CancellationToken::new();
    let producer = Producer::odd(Duration::from_millis(700), gate.clone(), Bus::new(8));
    let handle = tokio::spawn(producer.spawn(ctx.clone()));

    // Let the producer get past its loop-top check and queue on the gate.
    tokio::time::sleep(Duration::from_millis(50)).await;
    ctx.cancel();
    drop(held);

    let res = tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("producer did not stop")
        .unwrap();
    assert!(matches!(res, Err(TaskError::Canceled)));

    let tokens = gate.acquire().await.read_all().await.unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].parity(), Parity::Odd);
}

#[tokio::test]
async fn writers_and_reader_share_one_gate() {
    let gate = Gate::new(SharedStore::new(MemorySink::new()));
    let bus = Bus::new(1024);
    let mut rx = bus.subscribe();
    let ctx = CancellationToken::new();

    let tasks: Vec<Box<dyn Task>> = vec![
        Box::new(Producer::even(Duration::from_millis(5), gate.clone(), bus.clone())),
        Box::new(Producer::odd(Duration::from_millis(7), gate.clone(), bus.clone())),
        Box::new(TailObserver::new(Duration::from_millis(10), gate.clone(), bus.clone())),
    ];
    let handles: Vec<_> = tasks
        .iter()
        .map(|t| tokio::spawn(t.spawn(ctx.clone())))
        .collect();

    tokio::time::sleep(Duration::from_millis(300)).await;
    ctx.cancel();
    for h in handles {
        let _ = h.await.unwrap();
    }

    let events = drain(&mut rx);
    assert!(of_kind(&events, EventKind::StoreFailed).is_empty());
    for ev in of_kind(&events, EventKind::TailRead) {
        let tail = ev.tail.as_ref().unwrap();
        assert!(!tail.is_empty() && tail.len() <= 5);
    }
    let tokens = gate.acquire().await.read_all().await.unwrap();
    assert_eq!(
        tokens.len(),
        of_kind(&events, EventKind::ValueWritten).len()
    );
}
