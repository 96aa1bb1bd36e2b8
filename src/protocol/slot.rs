//! Slot identifiers.

use std::fmt;

use super::wire_format::{REQUEST_SLOT, RESPONSE_SLOT, SLOT_COUNT, STATUS_SLOT};
use crate::error::SlotlinkError;

/// One of the three shared string slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Handshake status (index 0).
    Status,
    /// Outbound question (index 1).
    Request,
    /// Inbound answer (index 2).
    Response,
}

impl Slot {
    /// All slots in index order.
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::Status, Slot::Request, Slot::Response];

    /// Slot index on the device.
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Slot::Status => STATUS_SLOT,
            Slot::Request => REQUEST_SLOT,
            Slot::Response => RESPONSE_SLOT,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = SlotlinkError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            STATUS_SLOT => Ok(Slot::Status),
            REQUEST_SLOT => Ok(Slot::Request),
            RESPONSE_SLOT => Ok(Slot::Response),
            other => Err(SlotlinkError::InvalidSlot(other)),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Str{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::try_from(slot.index()).unwrap(), slot);
        }
    }

    #[test]
    fn test_invalid_index() {
        let result = Slot::try_from(3);
        assert!(matches!(result, Err(SlotlinkError::InvalidSlot(3))));
    }

    #[test]
    fn test_display_uses_device_name() {
        assert_eq!(Slot::Status.to_string(), "Str0");
        assert_eq!(Slot::Response.to_string(), "Str2");
    }
}
