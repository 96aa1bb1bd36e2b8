//! Offline run - no slot storage present.
//!
//! The engine detects the missing storage when it is built and runs in
//! simulation mode: writes are dropped, reads come back empty, and every
//! question ends in a timeout.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=slotlink=debug cargo run --example offline -- "What is 2+2?"
//! ```

use slotlink::channel::UnavailableChannel;
use slotlink::engine::EngineMode;
use slotlink::{Engine, LinkConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = LinkConfig::load_or_default()?;
    // Keep the demo short
    config.timeout_secs = config.timeout_secs.min(3);

    let engine = Engine::builder()
        .config(&config)
        .build(UnavailableChannel::new());
    if engine.mode() == EngineMode::Simulation {
        eprintln!("Slot storage not available, running in simulation mode");
    }

    let question = std::env::args().nth(1).unwrap_or_default();
    let (text, ok) = engine.ask_default(&question).await.into_pair();
    println!("{}{}", if ok { "OK: " } else { "ERR: " }, text);

    Ok(())
}
