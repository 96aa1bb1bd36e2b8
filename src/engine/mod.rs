//! Protocol engine and its builder.
//!
//! The [`EngineBuilder`] provides a fluent API for timing and limits. The
//! [`Engine`] drives one request/response cycle per [`Engine::ask`] call:
//! 1. Write the question to the request slot
//! 2. Write `GO` to the status slot
//! 3. Poll the status slot at a fixed interval
//! 4. Return on `DONE`, `ERROR`, or when the deadline passes
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use slotlink::channel::MemoryChannel;
//! use slotlink::engine::{Engine, Outcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = Engine::builder()
//!     .poll_interval(Duration::from_millis(10))
//!     .build(MemoryChannel::new());
//!
//! assert_eq!(engine.ask("", Duration::from_secs(1)).await, Outcome::NoOp);
//! # }
//! ```

mod guard;
mod outcome;
mod session;

pub use outcome::{Failure, Outcome};
pub use session::{Session, SessionState};

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::channel::SlotChannel;
use crate::config::LinkConfig;
use crate::error::SlotlinkError;
use crate::protocol::{
    markers, Slot, Status, DEFAULT_MAX_VALUE_LEN, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT,
};
use crate::query::Query;
use guard::{SessionGuard, SessionTracker};

/// Progress report passed to the progress callback on every `WAIT` poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Status polls so far in this session.
    pub polls: u32,
    /// Time since `GO` was written.
    pub elapsed: Duration,
}

/// Callback invoked while the bridge reports `WAIT`.
pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Whether slot writes reach real storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// The channel is backed by device storage.
    Live,
    /// The channel has no storage. The protocol still runs but no bridge can
    /// ever answer, so every non-empty `ask` ends in a timeout.
    Simulation,
}

/// Builder for configuring and creating an [`Engine`].
pub struct EngineBuilder {
    poll_interval: Duration,
    timeout: Duration,
    max_request_len: usize,
    on_progress: Option<ProgressCallback>,
}

impl EngineBuilder {
    /// Create a builder with default timing.
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            max_request_len: DEFAULT_MAX_VALUE_LEN,
            on_progress: None,
        }
    }

    /// Take timing and limits from a loaded configuration.
    pub fn config(self, config: &LinkConfig) -> Self {
        self.poll_interval(config.poll_interval())
            .timeout(config.timeout())
            .max_request_len(config.max_request_len)
    }

    /// Set the interval between status polls.
    ///
    /// A zero interval is raised to 1 ms so the loop still yields.
    /// Default: 300 ms
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Set the timeout used by [`Engine::ask_default`].
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the longest question accepted, in chars.
    ///
    /// Default: 255
    pub fn max_request_len(mut self, max: usize) -> Self {
        self.max_request_len = max;
        self
    }

    /// Register a callback for `WAIT` polls.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Progress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Build the engine on top of `channel`.
    ///
    /// Checks channel availability once and picks the engine mode.
    pub fn build<C: SlotChannel>(self, channel: C) -> Engine<C> {
        let mode = if channel.is_available() {
            EngineMode::Live
        } else {
            tracing::warn!("Slot storage not available, engine running in simulation mode");
            EngineMode::Simulation
        };

        Engine {
            channel,
            poll_interval: self.poll_interval,
            timeout: self.timeout,
            max_request_len: self.max_request_len,
            on_progress: self.on_progress,
            mode,
            tracker: Arc::new(SessionTracker::new()),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client side of the slot handshake.
///
/// One session at a time: a second `ask` while one is outstanding returns
/// [`Failure::Busy`] without touching any slot.
pub struct Engine<C> {
    channel: C,
    poll_interval: Duration,
    timeout: Duration,
    max_request_len: usize,
    on_progress: Option<ProgressCallback>,
    mode: EngineMode,
    tracker: Arc<SessionTracker>,
}

impl Engine<()> {
    /// Create a new engine builder.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }
}

impl<C: SlotChannel> Engine<C> {
    /// Build an engine with default settings.
    pub fn new(channel: C) -> Self {
        EngineBuilder::new().build(channel)
    }

    /// Mode picked at construction.
    #[inline]
    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    /// State of the outstanding session, `Idle` between sessions.
    pub fn state(&self) -> SessionState {
        self.tracker.state()
    }

    /// Whether a session is outstanding.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.tracker.is_busy()
    }

    /// Poll interval.
    #[inline]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Timeout used by [`ask_default`](Self::ask_default).
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The underlying channel.
    #[inline]
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Ask with the configured timeout.
    pub async fn ask_default(&self, question: &str) -> Outcome {
        self.ask(question, self.timeout).await
    }

    /// Compose `query` into question text and ask it.
    pub async fn ask_query(&self, query: &Query, timeout: Duration) -> Outcome {
        self.ask(&query.compose(), timeout).await
    }

    /// Run one request/response cycle.
    ///
    /// An empty question returns [`Outcome::NoOp`] before any slot is
    /// touched. Otherwise the request slot is written, then `GO`, then the
    /// status slot is polled until `DONE`, `ERROR`, or `timeout` after `GO`.
    /// Nothing is sent to the bridge on timeout; a late answer is lost.
    pub async fn ask(&self, question: &str, timeout: Duration) -> Outcome {
        if question.is_empty() {
            tracing::debug!("Empty question, nothing sent");
            return Outcome::NoOp;
        }

        let len = question.chars().count();
        if len > self.max_request_len {
            tracing::warn!(
                "Question is {} chars, request slot holds {}",
                len,
                self.max_request_len
            );
            return Outcome::Failed(Failure::RequestTooLong {
                len,
                max: self.max_request_len,
            });
        }

        let guard = match SessionGuard::try_acquire(&self.tracker) {
            Some(g) => g,
            None => {
                tracing::warn!("Session already outstanding, rejecting ask");
                return Outcome::Failed(Failure::Busy);
            }
        };

        let mut session = Session::new(question, timeout);

        // Request strictly before GO: the bridge only watches the status slot,
        // so GO after a failed write would expose the previous request.
        if let Err(e) = self.channel.write(Slot::Request, question) {
            tracing::warn!("Write to {} failed, not signalling GO: {}", Slot::Request, e);
            return Outcome::Failed(match e {
                SlotlinkError::ValueTooLong { len, max, .. } => {
                    Failure::RequestTooLong { len, max }
                }
                _ => Failure::RequestNotWritten,
            });
        }
        self.advance(&mut session, &guard, SessionState::RequestWritten);

        self.write_slot(Slot::Status, markers::GO);
        self.advance(&mut session, &guard, SessionState::AwaitingStatus);
        tracing::debug!("Request issued ({} chars), timeout {:?}", len, timeout);

        self.poll_until_terminal(&mut session, &guard).await
    }

    /// Poll the status slot until a terminal status or the deadline.
    async fn poll_until_terminal(&self, session: &mut Session, guard: &SessionGuard) -> Outcome {
        let deadline = session
            .deadline()
            .unwrap_or_else(|| Instant::now() + session.timeout());

        loop {
            session.record_poll();

            match Status::parse(&self.read_slot(Slot::Status)) {
                Status::Done => {
                    let answer = self.read_slot(Slot::Response);
                    self.advance(session, guard, SessionState::Done);
                    tracing::debug!(
                        "Answer received after {} polls ({} chars)",
                        session.polls(),
                        answer.chars().count()
                    );
                    return Outcome::Answered(answer);
                }
                Status::Error => {
                    self.advance(session, guard, SessionState::Failed);
                    tracing::debug!("Bridge reported an error after {} polls", session.polls());
                    return Outcome::Failed(Failure::Application);
                }
                Status::Wait => {
                    tracing::trace!("Bridge still working");
                    if let Some(callback) = &self.on_progress {
                        callback(&Progress {
                            polls: session.polls(),
                            elapsed: session.elapsed(),
                        });
                    }
                }
                Status::Go | Status::Empty => {}
                Status::Unknown(raw) => {
                    tracing::trace!("Ignoring unknown status {:?}", raw);
                }
            }

            let now = Instant::now();
            if now >= deadline {
                let elapsed = session.elapsed();
                self.advance(session, guard, SessionState::TimedOut);
                tracing::debug!(
                    "No terminal status after {:?} ({} polls)",
                    elapsed,
                    session.polls()
                );
                return Outcome::Failed(Failure::Timeout { elapsed });
            }

            // The last poll lands exactly on the deadline.
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    fn advance(&self, session: &mut Session, guard: &SessionGuard, next: SessionState) {
        if session.advance(next) {
            guard.publish(next);
        }
    }

    /// Write a slot; failures degrade to a no-op.
    fn write_slot(&self, slot: Slot, value: &str) {
        if let Err(e) = self.channel.write(slot, value) {
            tracing::warn!("Write to {} failed, continuing: {}", slot, e);
        }
    }

    /// Read a slot; failures degrade to an empty value.
    fn read_slot(&self, slot: Slot) -> String {
        self.channel.read(slot).unwrap_or_else(|e| {
            tracing::warn!("Read of {} failed, treating as empty: {}", slot, e);
            String::new()
        })
    }
}
