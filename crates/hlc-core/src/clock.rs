//! Hybrid Logical Clock state machine.
//!
//! A [`Clock`] stamps local events with [`Clock::tick`] and folds in
//! timestamps observed from peers with [`Clock::update`]. Every timestamp it
//! returns orders after everything the clock has issued or observed before,
//! even when the wall clock stalls or steps backwards.
//!
//! The logical counter is 16 bits wide and wraps to 0 after 65535 events
//! within a single millisecond of stalled wall-clock time.
//!
//! `Clock` is a plain single-owner value; share one across threads through
//! [`SharedClock`](crate::SharedClock).
//!
//! # References
//!
//! Kulkarni, Demirbas, et al. "Logical Physical Clocks and Consistent Snapshots
//! in Globally Distributed Databases" (2014)

use crate::node::NodeId;
use crate::source::{SystemClock, WallClock};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Persistable snapshot of a clock's counters.
///
/// Restoring through [`Clock::from_state`] after a restart keeps the clock
/// from issuing timestamps below ones it handed out before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    /// Last physical time issued or observed
    pub physical_time: u64,
    /// Last logical counter issued
    pub logical_time: u16,
    /// Node the clock speaks for
    pub node_id: NodeId,
}

/// Hybrid Logical Clock for one node.
#[derive(Debug, Clone)]
pub struct Clock<W = SystemClock> {
    physical_time: u64,
    logical_time: u16,
    node_id: NodeId,
    source: W,
}

impl Clock<SystemClock> {
    /// Create a clock reading the system wall clock.
    #[must_use]
    pub fn new(node_id: NodeId) -> Self {
        Self::with_source(node_id, SystemClock)
    }

    /// Restore a clock from a persisted snapshot, reading the system wall clock.
    #[must_use]
    pub fn from_state(state: ClockState) -> Self {
        Self::from_state_with_source(state, SystemClock)
    }
}

impl<W: WallClock> Clock<W> {
    /// Create a clock at the source's current reading with a zero counter.
    #[must_use]
    pub fn with_source(node_id: NodeId, source: W) -> Self {
        let physical_time = source.now_ms();
        Self {
            physical_time,
            logical_time: 0,
            node_id,
            source,
        }
    }

    /// Restore a clock from a persisted snapshot without resetting its counters.
    #[must_use]
    pub fn from_state_with_source(state: ClockState, source: W) -> Self {
        Self {
            physical_time: state.physical_time,
            logical_time: state.logical_time,
            node_id: state.node_id,
            source,
        }
    }

    /// The node this clock stamps timestamps with.
    #[must_use]
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Generate a new timestamp for a local event.
    pub fn tick(&mut self) -> Timestamp {
        let now = self.source.now_ms();

        if now > self.physical_time {
            // Wall clock advanced, reset logical counter
            self.physical_time = now;
            self.logical_time = 0;
        } else {
            if now < self.physical_time {
                tracing::debug!(
                    now,
                    physical_time = self.physical_time,
                    "Wall clock behind clock state"
                );
            }
            self.increment_logical(self.logical_time);
        }

        tracing::trace!(
            physical_time = self.physical_time,
            logical_time = self.logical_time,
            "tick"
        );
        self.current()
    }

    /// Merge a timestamp received from a peer and stamp the receive event.
    ///
    /// The result orders after both `remote` and every timestamp this clock
    /// produced before, and always carries the local node id.
    pub fn update(&mut self, remote: &Timestamp) -> Timestamp {
        let now = self.source.now_ms();
        let local = self.physical_time;
        let received = remote.physical_time;
        let max_physical = now.max(local).max(received);

        if received > now {
            tracing::debug!(
                node_id = %remote.node_id,
                skew_ms = received - now,
                "Remote timestamp ahead of local wall clock"
            );
        }

        let branch = if max_physical == now && now > local && now > received {
            // Wall clock is ahead of both, use it
            self.physical_time = now;
            self.logical_time = 0;
            "wall"
        } else if max_physical == local && local > received {
            // Local is ahead, just increment
            self.increment_logical(self.logical_time);
            "local"
        } else if max_physical == received && received > local {
            // Received is ahead, sync to it
            self.physical_time = received;
            self.increment_logical(remote.logical_time);
            "remote"
        } else {
            // Same physical time, take max logical and increment
            self.physical_time = max_physical;
            self.increment_logical(self.logical_time.max(remote.logical_time));
            "tie"
        };

        tracing::trace!(
            branch,
            physical_time = self.physical_time,
            logical_time = self.logical_time,
            "update"
        );
        self.current()
    }

    /// The latest timestamp, without advancing the clock.
    #[must_use]
    pub fn current(&self) -> Timestamp {
        Timestamp::new(self.physical_time, self.logical_time, self.node_id.clone())
    }

    /// Snapshot the counters for persistence.
    #[must_use]
    pub fn state(&self) -> ClockState {
        ClockState {
            physical_time: self.physical_time,
            logical_time: self.logical_time,
            node_id: self.node_id.clone(),
        }
    }

    fn increment_logical(&mut self, base: u16) {
        self.logical_time = base.wrapping_add(1);
        if self.logical_time == 0 {
            tracing::warn!(
                physical_time = self.physical_time,
                "Logical counter wrapped within one millisecond"
            );
        }
    }
}
