//! Wire contract over the shared string slots.
//!
//! ```text
//! ┌──────┬──────────┬──────────────────┬──────────────────────────────────┐
//! │ Slot │ Name     │ Direction        │ Content                          │
//! ├──────┼──────────┼──────────────────┼──────────────────────────────────┤
//! │ 0    │ status   │ both             │ "", GO, WAIT, DONE, ERROR        │
//! │ 1    │ request  │ client → bridge  │ raw question text                │
//! │ 2    │ response │ bridge → client  │ raw answer text (valid on DONE)  │
//! └──────┴──────────┴──────────────────┴──────────────────────────────────┘
//! ```
//!
//! The client writes the request slot strictly before writing `GO` to the
//! status slot. The bridge writes the response slot strictly before `DONE`.

use std::time::Duration;

/// Number of slots the protocol uses.
pub const SLOT_COUNT: usize = 3;

/// Status slot index.
pub const STATUS_SLOT: u8 = 0;

/// Request slot index.
pub const REQUEST_SLOT: u8 = 1;

/// Response slot index.
pub const RESPONSE_SLOT: u8 = 2;

/// Status markers written to the status slot.
pub mod markers {
    /// Client has written a request and is waiting.
    pub const GO: &str = "GO";
    /// Bridge is still working on the request.
    pub const WAIT: &str = "WAIT";
    /// Bridge has written the response slot.
    pub const DONE: &str = "DONE";
    /// Bridge failed to produce an answer.
    pub const ERROR: &str = "ERROR";
}

/// Default interval between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Default session timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default capacity of a single slot in chars.
///
/// Conservative limit for calculator string variables.
pub const DEFAULT_MAX_VALUE_LEN: usize = 255;
