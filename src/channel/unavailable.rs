//! Channel used when the slot primitive is not present.

use super::SlotChannel;
use crate::error::Result;
use crate::protocol::Slot;

/// Slot channel with no backing storage.
///
/// Writes are logged and dropped, reads return an empty string. An engine
/// built on this channel runs in simulation mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableChannel;

impl UnavailableChannel {
    /// Create the channel.
    pub fn new() -> Self {
        Self
    }
}

impl SlotChannel for UnavailableChannel {
    fn read(&self, slot: Slot) -> Result<String> {
        tracing::trace!("[stub] recall {}", slot);
        Ok(String::new())
    }

    fn write(&self, slot: Slot, value: &str) -> Result<()> {
        tracing::debug!("[stub] store {} = {:?}", slot, value);
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}
