//! Single-session guard.
//!
//! The protocol allows one outstanding request at a time. The guard claims
//! the engine for a session and gives it back on drop, including when the
//! `ask` future is dropped mid-poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::session::SessionState;

/// Engine state shared between the engine and the active guard.
#[derive(Debug)]
pub(crate) struct SessionTracker {
    busy: AtomicBool,
    state: Mutex<SessionState>,
}

impl SessionTracker {
    pub(crate) fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            state: Mutex::new(SessionState::Idle),
        }
    }

    #[inline]
    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub(crate) fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, state: SessionState) {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }
}

/// Claim on the engine for the lifetime of one session.
pub(crate) struct SessionGuard {
    tracker: Arc<SessionTracker>,
}

impl SessionGuard {
    /// Claim the engine, or `None` if a session is already outstanding.
    pub(crate) fn try_acquire(tracker: &Arc<SessionTracker>) -> Option<Self> {
        tracker
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                tracker: tracker.clone(),
            })
    }

    /// Make the session's current state visible through the engine.
    pub(crate) fn publish(&self, state: SessionState) {
        self.tracker.set_state(state);
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.tracker.set_state(SessionState::Idle);
        self.tracker.busy.store(false, Ordering::Release);
    }
}
