//! Access-logging channel wrapper.

use std::sync::{Arc, Mutex, MutexGuard};

use super::SlotChannel;
use crate::error::Result;
use crate::protocol::Slot;

/// One observed slot access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// A read of the given slot.
    Read(Slot),
    /// A write of the given value to the given slot.
    Write(Slot, String),
}

/// Wraps a channel and records every access in order.
///
/// Clones share the log. Failed accesses are recorded too.
#[derive(Debug, Clone)]
pub struct RecordingChannel<C> {
    inner: C,
    log: Arc<Mutex<Vec<Access>>>,
}

impl<C: SlotChannel> RecordingChannel<C> {
    /// Wrap `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The wrapped channel.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Copy of the access log.
    pub fn accesses(&self) -> Vec<Access> {
        self.lock().clone()
    }

    /// Values written to `slot`, oldest first.
    pub fn writes_to(&self, slot: Slot) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|a| match a {
                Access::Write(s, v) if *s == slot => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of reads of `slot`.
    pub fn reads_of(&self, slot: Slot) -> usize {
        self.lock()
            .iter()
            .filter(|a| matches!(a, Access::Read(s) if *s == slot))
            .count()
    }

    /// Drop all recorded accesses.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Access>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<C: SlotChannel> SlotChannel for RecordingChannel<C> {
    fn read(&self, slot: Slot) -> Result<String> {
        self.lock().push(Access::Read(slot));
        self.inner.read(slot)
    }

    fn write(&self, slot: Slot, value: &str) -> Result<()> {
        self.lock().push(Access::Write(slot, value.to_string()));
        self.inner.write(slot, value)
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
