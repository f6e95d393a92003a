//! Thread-safe access point for a node's single clock.

use crate::clock::{Clock, ClockState};
use crate::node::NodeId;
use crate::source::{SystemClock, WallClock};
use crate::timestamp::Timestamp;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle serializing access to one [`Clock`].
///
/// Every `tick` and `update` holds the lock for its whole read-modify-write,
/// so producers on several threads still observe one monotonic stream.
#[derive(Debug)]
pub struct SharedClock<W = SystemClock> {
    inner: Arc<Mutex<Clock<W>>>,
}

impl<W> Clone for SharedClock<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: WallClock> SharedClock<W> {
    /// Take ownership of a clock and share it.
    #[must_use]
    pub fn new(clock: Clock<W>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(clock)),
        }
    }

    /// See [`Clock::tick`].
    pub fn tick(&self) -> Timestamp {
        self.lock().tick()
    }

    /// See [`Clock::update`].
    pub fn update(&self, remote: &Timestamp) -> Timestamp {
        self.lock().update(remote)
    }

    /// See [`Clock::current`].
    #[must_use]
    pub fn current(&self) -> Timestamp {
        self.lock().current()
    }

    /// See [`Clock::state`].
    #[must_use]
    pub fn state(&self) -> ClockState {
        self.lock().state()
    }

    /// The node this clock stamps timestamps with.
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        self.lock().node_id().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Clock<W>> {
        // The counters are valid after any panic, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: WallClock> From<Clock<W>> for SharedClock<W> {
    fn from(clock: Clock<W>) -> Self {
        Self::new(clock)
    }
}
