//! Responder module - the bridge side of the handshake.
//!
//! The real bridge runs on separate hardware. This responder honors the same
//! contract against any [`SlotChannel`], so the engine can be exercised
//! end to end without a device:
//!
//! 1. Wait for `GO` in the status slot
//! 2. Read the request slot
//! 3. Optionally report `WAIT`
//! 4. Write the response slot, then `DONE`; or only `ERROR`
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use slotlink::channel::MemoryChannel;
//! use slotlink::engine::{Engine, Outcome};
//! use slotlink::responder::{Responder, StaticAnswers};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let channel = MemoryChannel::new();
//! let bridge = Responder::new(channel.clone(), StaticAnswers::new().with_answer("2+2?", "4"))
//!     .poll_interval(Duration::from_millis(5))
//!     .spawn();
//!
//! let engine = Engine::builder()
//!     .poll_interval(Duration::from_millis(5))
//!     .build(channel);
//! let outcome = engine.ask("2+2?", Duration::from_secs(5)).await;
//! assert_eq!(outcome, Outcome::Answered("4".into()));
//! bridge.abort();
//! # }
//! ```

mod source;

pub use source::{from_fn, AnswerResult, AnswerSource, BoxFuture, FnSource, StaticAnswers};

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::channel::SlotChannel;
use crate::error::Result;
use crate::protocol::{markers, Slot, Status};

/// Default responder poll interval.
pub const DEFAULT_RESPONDER_POLL: Duration = Duration::from_millis(50);

/// Result of serving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Served {
    /// Question read from the request slot.
    pub question: String,
    /// `true` if `DONE` was written, `false` if `ERROR`.
    pub answered: bool,
}

/// Contract-honoring bridge stand-in.
pub struct Responder<C, S> {
    channel: C,
    source: S,
    poll_interval: Duration,
    wait_markers: u32,
}

impl<C, S> Responder<C, S>
where
    C: SlotChannel,
    S: AnswerSource,
{
    /// Create a responder answering from `source`.
    pub fn new(channel: C, source: S) -> Self {
        Self {
            channel,
            source,
            poll_interval: DEFAULT_RESPONDER_POLL,
            wait_markers: 0,
        }
    }

    /// Interval between status reads while waiting for `GO`, and between
    /// `WAIT` markers.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Write `WAIT` this many times before answering.
    pub fn wait_markers(mut self, count: u32) -> Self {
        self.wait_markers = count;
        self
    }

    /// Wait for one request and answer it.
    ///
    /// The response slot is written strictly before `DONE`. On a source
    /// error, or an answer the response slot rejects, only `ERROR` is
    /// written and the response slot keeps its previous value.
    pub async fn serve_once(&self) -> Result<Served> {
        while Status::parse(&self.channel.read(Slot::Status)?) != Status::Go {
            tokio::time::sleep(self.poll_interval).await;
        }

        let question = self.channel.read(Slot::Request)?;
        tracing::debug!("Bridge received request ({} chars)", question.chars().count());

        for _ in 0..self.wait_markers {
            self.channel.write(Slot::Status, markers::WAIT)?;
            tokio::time::sleep(self.poll_interval).await;
        }

        let answered = match self.source.answer(&question).await {
            Ok(answer) => match self.channel.write(Slot::Response, &answer) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Answer does not fit the response slot: {}", e);
                    false
                }
            },
            Err(reason) => {
                tracing::warn!("No answer: {}", reason);
                false
            }
        };

        let marker = if answered { markers::DONE } else { markers::ERROR };
        self.channel.write(Slot::Status, marker)?;

        Ok(Served { question, answered })
    }

    /// Serve requests forever on a background task.
    ///
    /// Abort the returned handle to stop. Channel errors are logged and the
    /// loop keeps going.
    pub fn spawn(self) -> JoinHandle<()>
    where
        C: 'static,
    {
        tokio::spawn(async move {
            loop {
                if let Err(e) = self.serve_once().await {
                    tracing::error!("Responder error: {}", e);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        })
    }
}
