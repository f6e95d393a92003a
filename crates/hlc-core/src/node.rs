//! Stable per-replica node identifiers.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Field separator of the string encoding; never allowed inside a node id.
pub const SEPARATOR: char = ':';

/// Identifier of the device, process or replica that owns a clock.
///
/// Used only as the final tie-breaker when ordering timestamps. A node id is
/// non-empty and never contains [`SEPARATOR`], so every timestamp survives the
/// `"{physical}:{logical}:{node}"` encoding unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Validate and wrap a node id.
    ///
    /// # Errors
    ///
    /// Returns error if the id is empty or contains `:`.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigurationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigurationError::Empty);
        }
        if id.contains(SEPARATOR) {
            return Err(ConfigurationError::ContainsSeparator(id));
        }
        Ok(Self(id))
    }

    /// Generate a fresh random node id (UUID v4, hyphenated).
    ///
    /// Hosts that use this must persist the result; a node id is only useful
    /// if it stays stable across restarts.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for NodeId {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NodeId {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}
