//! Simulated link - engine and bridge over an in-memory slot table.
//!
//! This demo demonstrates:
//! - Wiring an engine and a responder to the same slots
//! - Progress reports while the bridge says `WAIT`
//! - The `(text, ok)` result for an answer, an error, and a timeout
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=slotlink=debug cargo run --example simulate
//! ```

use std::time::Duration;

use slotlink::channel::MemoryChannel;
use slotlink::responder::{Responder, StaticAnswers};
use slotlink::{Engine, FactTopic, Query};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let channel = MemoryChannel::new();

    // Bridge stand-in: reports WAIT twice, then answers from a fixed table
    let bridge = Responder::new(
        channel.clone(),
        StaticAnswers::new()
            .with_answer("What is 2+2?", "4")
            .with_answer("Solve: x+1=3", "x=2")
            .with_answer(
                "Tell me an interesting science fact",
                "Octopuses have three hearts.",
            )
            .delay(Duration::from_millis(200)),
    )
    .poll_interval(Duration::from_millis(100))
    .wait_markers(2)
    .spawn();

    let engine = Engine::builder()
        .poll_interval(Duration::from_millis(300))
        .on_progress(|p| eprintln!("  ...working ({:.1}s)", p.elapsed.as_secs_f32()))
        .build(channel);

    let queries = [
        Query::Ask("What is 2+2?".into()),
        Query::Solve("x+1=3".into()),
        Query::Fact(FactTopic::Science),
        Query::Ask("Something the bridge cannot answer".into()),
    ];

    for query in &queries {
        let question = query.compose();
        println!("> {}", question);
        let (text, ok) = engine
            .ask_query(query, Duration::from_secs(5))
            .await
            .into_pair();
        println!("{}{}", if ok { "OK: " } else { "ERR: " }, text);
    }

    // No bridge: the deadline passes and the session times out
    bridge.abort();
    let (text, ok) = engine
        .ask("Anyone there?", Duration::from_secs(1))
        .await
        .into_pair();
    println!("{}{}", if ok { "OK: " } else { "ERR: " }, text);

    Ok(())
}
