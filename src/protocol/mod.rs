//! Protocol module - slot layout, status vocabulary, and timing defaults.
//!
//! This module describes the handshake contract shared by client and bridge:
//! - Which slot carries what
//! - The status markers and how they classify
//! - Default poll interval, timeout, and slot capacity

mod slot;
mod status;
mod wire_format;

pub use slot::Slot;
pub use status::Status;
pub use wire_format::{
    markers, DEFAULT_MAX_VALUE_LEN, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, REQUEST_SLOT,
    RESPONSE_SLOT, SLOT_COUNT, STATUS_SLOT,
};
