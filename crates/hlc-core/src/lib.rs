//! # HLC Core
//!
//! Hybrid Logical Clock (HLC) timestamps for CRDT replication.
//!
//! This crate provides:
//! - [`Timestamp`], a totally ordered `(physical, logical, node)` triple with
//!   string and JSON record encodings
//! - [`Clock`], the per-node state machine that stamps local events and
//!   merges timestamps received from peers
//! - [`SharedClock`], a locked handle for sharing one clock between threads
//! - [`WallClock`] sources: the system clock and a manually driven one
//!
//! ```
//! use hlc_core::{Clock, ManualClock, NodeId, Timestamp};
//!
//! let source = ManualClock::new(1000);
//! let mut clock = Clock::with_source(NodeId::new("A")?, source.clone());
//!
//! let first = clock.tick();
//! assert_eq!(first.encode(), "1000:1:A");
//!
//! let remote: Timestamp = "1200:3:B".parse()?;
//! let merged = clock.update(&remote);
//! assert!(merged.happens_after(&remote));
//! assert_eq!(merged.encode(), "1200:4:A");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod error;
pub mod node;
pub mod shared;
pub mod source;
pub mod timestamp;

pub use clock::{Clock, ClockState};
pub use error::{ConfigurationError, FormatError};
pub use node::NodeId;
pub use shared::SharedClock;
pub use source::{ManualClock, SystemClock, WallClock};
pub use timestamp::Timestamp;
