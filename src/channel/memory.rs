//! In-memory slot table.

use std::sync::{Arc, Mutex, MutexGuard};

use super::SlotChannel;
use crate::error::{Result, SlotlinkError};
use crate::protocol::{Slot, DEFAULT_MAX_VALUE_LEN, SLOT_COUNT};

/// Shared in-memory slot table.
///
/// Clones share the same table, so one clone can be handed to an engine and
/// another to a responder. There is no locking across calls: each single
/// read or write is atomic, nothing more.
#[derive(Debug, Clone)]
pub struct MemoryChannel {
    slots: Arc<Mutex<[String; SLOT_COUNT]>>,
    max_len: usize,
}

impl MemoryChannel {
    /// Create an empty table with the default slot capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_VALUE_LEN)
    }

    /// Create an empty table whose slots hold at most `max_len` chars.
    pub fn with_capacity(max_len: usize) -> Self {
        Self {
            slots: Arc::new(Mutex::new(Default::default())),
            max_len,
        }
    }

    /// Slot capacity in chars.
    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Copy of all slot values in index order.
    pub fn snapshot(&self) -> [String; SLOT_COUNT] {
        self.lock().clone()
    }

    /// Reset every slot to empty.
    pub fn clear(&self) {
        for value in self.lock().iter_mut() {
            value.clear();
        }
    }

    fn lock(&self) -> MutexGuard<'_, [String; SLOT_COUNT]> {
        // A panic while holding the lock cannot leave a slot half-written.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotChannel for MemoryChannel {
    fn read(&self, slot: Slot) -> Result<String> {
        Ok(self.lock()[slot.index() as usize].clone())
    }

    fn write(&self, slot: Slot, value: &str) -> Result<()> {
        let len = value.chars().count();
        if len > self.max_len {
            return Err(SlotlinkError::ValueTooLong {
                slot,
                len,
                max: self.max_len,
            });
        }
        self.lock()[slot.index() as usize] = value.to_string();
        Ok(())
    }
}
