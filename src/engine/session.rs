//! One request/response cycle and its state machine.
//!
//! ```text
//! IDLE ──ask──► REQUEST_WRITTEN ──GO──► AWAITING_STATUS ─┬─ DONE ──► Done
//!                                          ▲    │         ├─ ERROR ─► Failed
//!                                          └────┘ WAIT    └─ deadline ► TimedOut
//! ```

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

/// Engine-local session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session outstanding.
    Idle,
    /// Request slot written, `GO` not yet signalled.
    RequestWritten,
    /// `GO` written, polling the status slot.
    AwaitingStatus,
    /// Bridge answered.
    Done,
    /// Bridge reported an error.
    Failed,
    /// Deadline passed without a terminal status.
    TimedOut,
}

impl SessionState {
    /// `Done`, `Failed` or `TimedOut`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Done | SessionState::Failed | SessionState::TimedOut
        )
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Idle, RequestWritten)
                | (RequestWritten, AwaitingStatus)
                | (AwaitingStatus, Done)
                | (AwaitingStatus, Failed)
                | (AwaitingStatus, TimedOut)
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "IDLE",
            SessionState::RequestWritten => "REQUEST_WRITTEN",
            SessionState::AwaitingStatus => "AWAITING_STATUS",
            SessionState::Done => "DONE",
            SessionState::Failed => "FAILED",
            SessionState::TimedOut => "TIMED_OUT",
        };
        f.write_str(name)
    }
}

/// A single outstanding request.
///
/// Lives for the duration of one `ask` call and is never persisted.
#[derive(Debug)]
pub struct Session {
    request: String,
    timeout: Duration,
    signalled_at: Option<Instant>,
    polls: u32,
    state: SessionState,
}

impl Session {
    /// Start a session for `request` bounded by `timeout`.
    pub fn new(request: &str, timeout: Duration) -> Self {
        Self {
            request: request.to_string(),
            timeout,
            signalled_at: None,
            polls: 0,
            state: SessionState::Idle,
        }
    }

    /// The question text.
    #[inline]
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Configured timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of status polls so far.
    #[inline]
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Move to `next`.
    ///
    /// Entering `AwaitingStatus` starts the timeout clock. Returns `false`
    /// and leaves the state unchanged if the transition is not allowed.
    pub fn advance(&mut self, next: SessionState) -> bool {
        if !self.state.can_transition_to(next) {
            tracing::warn!("Rejected session transition {} -> {}", self.state, next);
            return false;
        }
        if next == SessionState::AwaitingStatus {
            self.signalled_at = Some(Instant::now());
        }
        tracing::trace!("Session {} -> {}", self.state, next);
        self.state = next;
        true
    }

    /// Count one status poll.
    #[inline]
    pub fn record_poll(&mut self) {
        self.polls = self.polls.saturating_add(1);
    }

    /// Time since `GO` was written, zero before that.
    pub fn elapsed(&self) -> Duration {
        self.signalled_at
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Instant after which the session times out, once signalled.
    pub fn deadline(&self) -> Option<Instant> {
        self.signalled_at.map(|t| t + self.timeout)
    }
}
