//! Channel module - access to the shared string slots.
//!
//! The engine never touches device storage directly. It talks to a
//! [`SlotChannel`], which keeps the protocol testable off-device:
//!
//! - [`MemoryChannel`] - in-process slot table, shareable between an engine
//!   and a responder
//! - [`UnavailableChannel`] - stand-in when the slot primitive is missing;
//!   writes are dropped and reads come back empty
//! - [`RecordingChannel`] - wraps another channel and logs every access
//!
//! # Example
//!
//! ```
//! use slotlink::channel::{MemoryChannel, SlotChannel};
//! use slotlink::protocol::Slot;
//!
//! let channel = MemoryChannel::new();
//! assert_eq!(channel.read(Slot::Response).unwrap(), "");
//!
//! channel.write(Slot::Request, "2+2?").unwrap();
//! assert_eq!(channel.read(Slot::Request).unwrap(), "2+2?");
//! ```

mod memory;
mod recording;
mod unavailable;

pub use memory::MemoryChannel;
pub use recording::{Access, RecordingChannel};
pub use unavailable::UnavailableChannel;

use std::sync::Arc;

use crate::error::Result;
use crate::protocol::Slot;

/// Read/write access to the shared slot set.
///
/// Implementations hold no protocol logic. A read of an unset slot returns an
/// empty string, never an error. Errors are reserved for storage failures and
/// the engine degrades them to "empty"/"no-op".
pub trait SlotChannel: Send + Sync {
    /// Read the current value of a slot.
    fn read(&self, slot: Slot) -> Result<String>;

    /// Replace the value of a slot.
    fn write(&self, slot: Slot, value: &str) -> Result<()>;

    /// Whether writes reach real storage.
    ///
    /// Checked once when an engine is built to pick live or simulation mode.
    fn is_available(&self) -> bool {
        true
    }
}

impl<C: SlotChannel + ?Sized> SlotChannel for Arc<C> {
    fn read(&self, slot: Slot) -> Result<String> {
        (**self).read(slot)
    }

    fn write(&self, slot: Slot, value: &str) -> Result<()> {
        (**self).write(slot, value)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

impl<C: SlotChannel + ?Sized> SlotChannel for Box<C> {
    fn read(&self, slot: Slot) -> Result<String> {
        (**self).read(slot)
    }

    fn write(&self, slot: Slot, value: &str) -> Result<()> {
        (**self).write(slot, value)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
