//! # slotlink
//!
//! Request/response handshake over a handful of shared string slots.
//!
//! A calculator cannot send messages to the bridge device it is plugged into.
//! Both sides can only read and write three named string slots. This crate
//! builds a synchronous ask/answer exchange on top of that primitive.
//!
//! ## Architecture
//!
//! - **Channel**: [`SlotChannel`](channel::SlotChannel) reads and writes slots;
//!   injected so the protocol runs against memory in tests
//! - **Engine**: [`Engine`] writes the question, signals `GO`, polls for `DONE`
//!   or `ERROR`, and gives up at a deadline
//! - **Responder**: bridge-side stand-in honoring the same contract
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use slotlink::Engine;
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = Engine::builder()
//!         .timeout(Duration::from_secs(30))
//!         .build(device_slots());
//!
//!     let (text, ok) = engine.ask_default("What is 2+2?").await.into_pair();
//!     println!("{}: {}", if ok { "OK" } else { "ERR" }, text);
//! }
//! ```

pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod query;
pub mod responder;

pub use config::LinkConfig;
pub use engine::{Engine, EngineBuilder, Failure, Outcome};
pub use error::SlotlinkError;
pub use query::{FactTopic, Query};
