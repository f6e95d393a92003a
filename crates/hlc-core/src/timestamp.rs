//! HLC timestamps: a totally ordered `(physical, logical, node)` triple.
//!
//! Two encodings are supported:
//! - the compact string form `"{physical_time}:{logical_time}:{node_id}"`,
//!   e.g. `"1700000000000:0:device-A"`
//! - a structured record with exactly the keys `physical_time`,
//!   `logical_time` and `node_id`, for JSON payloads and persistence
//!
//! Both decoders reject malformed input with a [`FormatError`]; they never
//! produce a partially valid timestamp.

use crate::error::FormatError;
use crate::node::{NodeId, SEPARATOR};
use crate::source::current_time_ms;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A single point in hybrid logical time.
///
/// Ordered by physical time, then logical counter, then node id. Distinct
/// timestamps are therefore always strictly ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timestamp {
    /// Physical wall-clock time in milliseconds since UNIX epoch
    pub physical_time: u64,
    /// Counter for events within the same millisecond
    pub logical_time: u16,
    /// Node that issued the timestamp, last tie-breaker
    pub node_id: NodeId,
}

impl Timestamp {
    /// Create a timestamp from raw components.
    #[must_use]
    pub fn new(physical_time: u64, logical_time: u16, node_id: NodeId) -> Self {
        Self {
            physical_time,
            logical_time,
            node_id,
        }
    }

    /// Create a timestamp at the current wall-clock time with a zero counter.
    ///
    /// Not causally linked to anything; use a [`Clock`](crate::Clock) to stamp events.
    #[must_use]
    pub fn now(node_id: NodeId) -> Self {
        Self::new(current_time_ms(), 0, node_id)
    }

    /// True if `self` orders strictly before `other`.
    #[must_use]
    pub fn happens_before(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// True if `self` orders strictly after `other`.
    #[must_use]
    pub fn happens_after(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Always `false`.
    ///
    /// HLC timestamps form a total order; this layer never reports two
    /// timestamps as concurrent, even when they came from unrelated nodes.
    #[must_use]
    pub fn is_concurrent_with(&self, _other: &Self) -> bool {
        false
    }

    /// Encode as `"{physical_time}:{logical_time}:{node_id}"`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decode the string form produced by [`Timestamp::encode`].
    ///
    /// # Errors
    ///
    /// Returns error if the input does not have exactly three segments, if
    /// either numeric segment is not a non-negative integer in range, or if
    /// the node id is empty.
    pub fn decode(s: &str) -> Result<Self, FormatError> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let &[physical, logical, node] = parts.as_slice() else {
            return Err(FormatError::SegmentCount {
                actual: parts.len(),
            });
        };

        let physical_time =
            parse_digits(physical).ok_or_else(|| FormatError::InvalidPhysicalTime {
                value: physical.to_string(),
            })?;
        let logical_time =
            parse_digits(logical).ok_or_else(|| FormatError::InvalidLogicalTime {
                value: logical.to_string(),
            })?;
        let node_id = NodeId::new(node)?;

        Ok(Self::new(physical_time, logical_time, node_id))
    }

    /// Structured form with the keys `physical_time`, `logical_time`, `node_id`.
    #[must_use]
    pub fn to_record(&self) -> Value {
        json!({
            "physical_time": self.physical_time,
            "logical_time": self.logical_time,
            "node_id": self.node_id.as_str(),
        })
    }

    /// Parse the structured form produced by [`Timestamp::to_record`].
    ///
    /// # Errors
    ///
    /// Returns error if a key is missing, unknown or has the wrong type.
    pub fn from_record(record: &Value) -> Result<Self, FormatError> {
        Self::deserialize(record).map_err(|e| FormatError::Record(e.to_string()))
    }

    /// The physical component as a UTC date-time, if representable.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.physical_time).ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}

/// Parse an unsigned decimal without sign or whitespace.
fn parse_digits<T: FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        // First compare physical time
        match self.physical_time.cmp(&other.physical_time) {
            Ordering::Equal => {}
            ord => return ord,
        }
        // Then logical counter
        match self.logical_time.cmp(&other.logical_time) {
            Ordering::Equal => {}
            ord => return ord,
        }
        // Finally node id for deterministic tiebreaking
        self.node_id.cmp(&other.node_id)
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.physical_time, self.logical_time, self.node_id
        )
    }
}

impl FromStr for Timestamp {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
