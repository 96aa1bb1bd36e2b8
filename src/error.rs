//! Error types for slotlink.
//!
//! Protocol outcomes (answer, application error, timeout) are values, see
//! [`Outcome`](crate::engine::Outcome). The errors here cover slot access and
//! configuration loading.

use thiserror::Error;

use crate::protocol::Slot;

/// Main error type for all slotlink operations.
#[derive(Debug, Error)]
pub enum SlotlinkError {
    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Value does not fit in a slot.
    #[error("Value for {slot} is {len} chars, limit is {max}")]
    ValueTooLong {
        /// Target slot.
        slot: Slot,
        /// Length of the rejected value in chars.
        len: usize,
        /// Slot capacity in chars.
        max: usize,
    },

    /// Slot index outside the protocol's slot set.
    #[error("Invalid slot index: {0}")]
    InvalidSlot(u8),

    /// Underlying slot storage failed.
    #[error("Channel error: {0}")]
    Channel(String),
}

/// Result type alias using SlotlinkError.
pub type Result<T> = std::result::Result<T, SlotlinkError>;
