//! Error types for timestamp decoding and clock construction.

/// Failure to decode a [`Timestamp`](crate::Timestamp) from its string or record form.
///
/// Always recoverable: the caller decides whether to drop the offending
/// payload, request it again, or stop syncing with the peer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The encoded string did not split into exactly three segments
    #[error("expected 3 colon-separated segments, got {actual}")]
    SegmentCount {
        /// Number of segments found
        actual: usize,
    },

    /// The physical time segment is not a non-negative integer
    #[error("invalid physical time {value:?}")]
    InvalidPhysicalTime {
        /// The offending segment
        value: String,
    },

    /// The logical time segment is not an integer in `0..=65535`
    #[error("invalid logical time {value:?}")]
    InvalidLogicalTime {
        /// The offending segment
        value: String,
    },

    /// The node id segment is not a valid node id
    #[error("invalid node id: {0}")]
    InvalidNodeId(#[from] ConfigurationError),

    /// The structured record is missing a field or has a mistyped one
    #[error("invalid timestamp record: {0}")]
    Record(String),
}

/// A node id that can never round-trip through the string encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Node ids must not be empty
    #[error("node id must not be empty")]
    Empty,

    /// Node ids must not contain the `:` field separator
    #[error("node id {0:?} contains the ':' separator")]
    ContainsSeparator(String),
}
