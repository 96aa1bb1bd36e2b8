//! Integration tests for slotlink.
//!
//! These tests run the engine against a responder over a shared in-memory
//! slot table.

use std::time::Duration;

use slotlink::channel::{Access, MemoryChannel, RecordingChannel, SlotChannel};
use slotlink::engine::{Engine, EngineBuilder, Failure, Outcome, SessionState};
use slotlink::protocol::{markers, Slot};
use slotlink::responder::{from_fn, Responder, StaticAnswers};
use slotlink::{FactTopic, Query};

fn engine() -> EngineBuilder {
    Engine::builder().poll_interval(Duration::from_millis(10))
}

/// Test the full question → answer cycle.
#[tokio::test(start_paused = true)]
async fn test_round_trip() {
    let channel = MemoryChannel::new();
    let bridge = Responder::new(channel.clone(), StaticAnswers::new().with_answer("question", "answer"))
        .poll_interval(Duration::from_millis(5))
        .spawn();

    let engine = engine().build(channel);
    let outcome = engine.ask("question", Duration::from_secs(5)).await;

    assert_eq!(outcome.into_pair(), ("answer".to_string(), true));
    bridge.abort();
}

/// Slot 1 is written before slot 0 leaves empty, and the bridge answers 2+2.
#[tokio::test(start_paused = true)]
async fn test_two_plus_two_scenario() {
    let channel = MemoryChannel::new();
    let recording = RecordingChannel::new(channel.clone());

    let bridge = channel.clone();
    let stub = tokio::spawn(async move {
        loop {
            if bridge.read(Slot::Status).unwrap() == markers::GO {
                assert_eq!(bridge.read(Slot::Request).unwrap(), "2+2?");
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
        bridge.write(Slot::Response, "4").unwrap();
        bridge.write(Slot::Status, markers::DONE).unwrap();
    });

    let engine = engine().build(recording.clone());
    let outcome = engine.ask("2+2?", Duration::from_secs(5)).await;

    assert_eq!(outcome, Outcome::Answered("4".into()));
    stub.await.unwrap();

    let accesses = recording.accesses();
    assert_eq!(accesses[0], Access::Write(Slot::Request, "2+2?".into()));
    assert_eq!(accesses[1], Access::Write(Slot::Status, "GO".into()));
    assert_eq!(channel.snapshot()[0], "DONE");
}

/// After DONE is observed there is exactly one response read and no more polls.
#[tokio::test(start_paused = true)]
async fn test_terminal_stops_polling() {
    let channel = MemoryChannel::new();
    let recording = RecordingChannel::new(channel.clone());
    let bridge = Responder::new(channel.clone(), StaticAnswers::new().fallback("ok"))
        .poll_interval(Duration::from_millis(5))
        .spawn();

    let engine = engine().build(recording.clone());
    let outcome = engine.ask("anything", Duration::from_secs(5)).await;
    assert!(outcome.is_ok());

    // Give a runaway poll loop the chance to show up in the log.
    tokio::time::sleep(Duration::from_secs(1)).await;
    bridge.abort();

    let accesses = recording.accesses();
    assert_eq!(accesses.last(), Some(&Access::Read(Slot::Response)));
    assert_eq!(recording.reads_of(Slot::Response), 1);
}

/// ERROR is passed through and the response slot is never read.
#[tokio::test(start_paused = true)]
async fn test_error_passthrough() {
    let channel = MemoryChannel::new();
    channel.write(Slot::Response, "stale answer").unwrap();
    let recording = RecordingChannel::new(channel.clone());
    let bridge = Responder::new(channel.clone(), StaticAnswers::new())
        .poll_interval(Duration::from_millis(5))
        .spawn();

    let engine = engine().build(recording.clone());
    let outcome = engine.ask("unanswerable", Duration::from_secs(5)).await;

    assert_eq!(outcome, Outcome::Failed(Failure::Application));
    assert_eq!(outcome.into_pair(), ("ERROR".to_string(), false));
    assert_eq!(recording.reads_of(Slot::Response), 0);
    bridge.abort();
}

/// After ERROR is observed the status slot is not polled again.
#[tokio::test(start_paused = true)]
async fn test_error_stops_polling() {
    let channel = MemoryChannel::new();
    let recording = RecordingChannel::new(channel.clone());
    let bridge = Responder::new(channel.clone(), StaticAnswers::new())
        .poll_interval(Duration::from_millis(5))
        .spawn();

    let engine = engine().build(recording.clone());
    let outcome = engine.ask("unanswerable", Duration::from_secs(5)).await;
    assert_eq!(outcome, Outcome::Failed(Failure::Application));

    let status_reads = recording.reads_of(Slot::Status);
    tokio::time::sleep(Duration::from_secs(1)).await;
    bridge.abort();

    assert_eq!(recording.accesses().last(), Some(&Access::Read(Slot::Status)));
    assert_eq!(recording.reads_of(Slot::Status), status_reads);
}

/// A question the request slot cannot hold is never signalled, so the
/// bridge cannot answer it with the previous session's request.
#[tokio::test(start_paused = true)]
async fn test_unwritable_request_does_not_reuse_previous_question() {
    let channel = MemoryChannel::with_capacity(8);
    let bridge = Responder::new(
        channel.clone(),
        from_fn(|q: String| async move { Ok(format!("re:{}", q)) }),
    )
    .poll_interval(Duration::from_millis(5))
    .spawn();

    let recording = RecordingChannel::new(channel);
    let engine = engine().build(recording.clone());

    let first = engine.ask("one", Duration::from_secs(5)).await;
    assert_eq!(first, Outcome::Answered("re:one".into()));

    let second = engine
        .ask("what is the capital of France?", Duration::from_secs(5))
        .await;
    assert_eq!(
        second,
        Outcome::Failed(Failure::RequestTooLong { len: 30, max: 8 })
    );
    assert_eq!(recording.writes_to(Slot::Status), vec!["GO"]);
    bridge.abort();
}

/// A bridge that never answers yields a timeout, never the stale response.
#[tokio::test(start_paused = true)]
async fn test_timeout_boundary() {
    let channel = MemoryChannel::new();
    channel.write(Slot::Response, "stale answer").unwrap();
    let recording = RecordingChannel::new(channel.clone());

    let engine = engine().build(recording.clone());
    let start = tokio::time::Instant::now();
    let outcome = engine.ask("hello?", Duration::from_secs(2)).await;

    match outcome {
        Outcome::Failed(Failure::Timeout { elapsed }) => {
            assert!(elapsed >= Duration::from_secs(2));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
    assert!(start.elapsed() < Duration::from_secs(3));
    assert_eq!(recording.reads_of(Slot::Response), 0);
    assert_eq!(engine.state(), SessionState::Idle);
}

/// An answer that lands after the deadline is not observed.
#[tokio::test(start_paused = true)]
async fn test_late_answer_is_lost() {
    let channel = MemoryChannel::new();
    let bridge = Responder::new(
        channel.clone(),
        StaticAnswers::new()
            .fallback("too late")
            .delay(Duration::from_secs(10)),
    )
    .poll_interval(Duration::from_millis(5))
    .spawn();

    let engine = engine().build(channel.clone());
    let outcome = engine.ask("slow", Duration::from_secs(1)).await;
    assert!(outcome.is_timeout());

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(channel.read(Slot::Response).unwrap(), "too late");
    bridge.abort();
}

/// Empty input never touches any slot.
#[tokio::test]
async fn test_empty_question_is_noop() {
    let channel = RecordingChannel::new(MemoryChannel::new());
    let engine = engine().build(channel.clone());

    assert_eq!(engine.ask("", Duration::from_secs(1)).await, Outcome::NoOp);
    assert_eq!(
        engine.ask_query(&Query::Solve("   ".into()), Duration::from_secs(1)).await,
        Outcome::NoOp
    );
    assert!(channel.accesses().is_empty());
    assert_eq!(channel.inner().snapshot(), [String::new(), String::new(), String::new()]);
}

/// WAIT markers surface progress and the session still completes.
#[tokio::test(start_paused = true)]
async fn test_progress_then_done() {
    let channel = MemoryChannel::new();
    let bridge = Responder::new(channel.clone(), StaticAnswers::new().fallback("eventually"))
        .poll_interval(Duration::from_millis(40))
        .wait_markers(3)
        .spawn();

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let engine = engine()
        .on_progress(move |p| {
            let _ = tx.send(p.polls);
        })
        .build(channel);

    let outcome = engine.ask("think hard", Duration::from_secs(5)).await;
    assert_eq!(outcome, Outcome::Answered("eventually".into()));

    let mut reports = Vec::new();
    while let Ok(polls) = rx.try_recv() {
        reports.push(polls);
    }
    assert!(!reports.is_empty());
    assert!(reports.windows(2).all(|w| w[0] < w[1]));
    bridge.abort();
}

/// Consecutive sessions are independent; each starts from a fresh GO.
#[tokio::test(start_paused = true)]
async fn test_sequential_sessions() {
    let channel = MemoryChannel::new();
    let bridge = Responder::new(
        channel.clone(),
        from_fn(|q: String| async move { Ok(format!("re: {}", q)) }),
    )
    .poll_interval(Duration::from_millis(5))
    .spawn();

    let recording = RecordingChannel::new(channel);
    let engine = engine().build(recording.clone());
    for q in ["one", "two", "three"] {
        let outcome = engine.ask(q, Duration::from_secs(5)).await;
        assert_eq!(outcome, Outcome::Answered(format!("re: {}", q)));
        assert_eq!(engine.state(), SessionState::Idle);
    }

    assert_eq!(recording.writes_to(Slot::Status), vec!["GO", "GO", "GO"]);
    bridge.abort();
}

/// Composed queries reach the bridge with their prefixes.
#[tokio::test(start_paused = true)]
async fn test_query_composition_reaches_bridge() {
    let channel = MemoryChannel::new();
    let bridge = Responder::new(
        channel.clone(),
        StaticAnswers::new()
            .with_answer("Solve: 2x=6", "x=3")
            .with_answer("Tell me an interesting math fact", "0.999...=1"),
    )
    .poll_interval(Duration::from_millis(5))
    .spawn();

    let engine = engine().build(channel);
    let solved = engine
        .ask_query(&Query::Solve("2x=6".into()), Duration::from_secs(5))
        .await;
    assert_eq!(solved.answer(), Some("x=3"));

    let fact = engine
        .ask_query(&Query::Fact(FactTopic::Math), Duration::from_secs(5))
        .await;
    assert_eq!(fact.answer(), Some("0.999...=1"));
    bridge.abort();
}
