//! Result of one request/response cycle.

use std::time::Duration;

use thiserror::Error;

/// Why a session ended without an answer.
///
/// The `Display` text is short enough to show on the calculator screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The bridge set the status slot to `ERROR`.
    #[error("ERROR")]
    Application,

    /// No terminal status arrived before the deadline.
    #[error("TIMEOUT")]
    Timeout {
        /// Time between `GO` and giving up.
        elapsed: Duration,
    },

    /// Another session was still outstanding. No slot was touched.
    #[error("BUSY")]
    Busy,

    /// The question does not fit in the request slot. No slot was touched.
    #[error("TOO LONG ({len}/{max})")]
    RequestTooLong {
        /// Question length in chars.
        len: usize,
        /// Request slot capacity in chars.
        max: usize,
    },

    /// The request slot could not be written, so `GO` was never signalled.
    #[error("NOT SENT")]
    RequestNotWritten,
}

/// Outcome of [`Engine::ask`](super::Engine::ask).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Empty question. Nothing was written.
    NoOp,
    /// The bridge reported `DONE`; carries the response slot.
    Answered(String),
    /// The session ended without an answer.
    Failed(Failure),
}

impl Outcome {
    /// `true` only for [`Outcome::Answered`].
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Answered(_))
    }

    /// `true` for a timed-out session.
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Outcome::Failed(Failure::Timeout { .. }))
    }

    /// The answer text, if any.
    pub fn answer(&self) -> Option<&str> {
        match self {
            Outcome::Answered(a) => Some(a),
            _ => None,
        }
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Failed(f) => Some(f),
            _ => None,
        }
    }

    /// Flatten into `(text, ok)`.
    ///
    /// No-op gives `("", false)`, an answer gives `(answer, true)`, a failure
    /// gives its display text and `false`.
    pub fn into_pair(self) -> (String, bool) {
        match self {
            Outcome::NoOp => (String::new(), false),
            Outcome::Answered(answer) => (answer, true),
            Outcome::Failed(failure) => (failure.to_string(), false),
        }
    }
}
