//! Status slot values and their classification.

use std::fmt;

use super::wire_format::markers;

/// Parsed value of the status slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Slot is unset or cleared.
    Empty,
    /// Request issued, bridge has not reacted yet.
    Go,
    /// Bridge is working.
    Wait,
    /// Response slot is ready.
    Done,
    /// Bridge reported a failure.
    Error,
    /// Anything outside the vocabulary.
    Unknown(String),
}

impl Status {
    /// Parse a raw slot value.
    ///
    /// Matching is exact; surrounding whitespace or lowercase markers are
    /// treated as unknown values.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => Status::Empty,
            markers::GO => Status::Go,
            markers::WAIT => Status::Wait,
            markers::DONE => Status::Done,
            markers::ERROR => Status::Error,
            other => Status::Unknown(other.to_string()),
        }
    }

    /// Raw slot value for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Empty => "",
            Status::Go => markers::GO,
            Status::Wait => markers::WAIT,
            Status::Done => markers::DONE,
            Status::Error => markers::ERROR,
            Status::Unknown(s) => s,
        }
    }

    /// `DONE` or `ERROR`: the client stops polling.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Done | Status::Error)
    }

    /// `WAIT`: the bridge signalled progress.
    #[inline]
    pub fn is_progress(&self) -> bool {
        matches!(self, Status::Wait)
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        Status::parse(raw)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Empty => f.write_str("<empty>"),
            other => f.write_str(other.as_str()),
        }
    }
}
