//! CLI configuration.

use anyhow::{Context, Result};
use hlc_core::{ClockState, NodeId};

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Node identifier; a random one is generated when unset
    pub node_id: Option<NodeId>,

    /// Clock state to restore instead of starting from the wall clock
    pub state: Option<ClockState>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HLC_NODE_ID`: Node identifier (must not contain `:`)
    /// - `HLC_STATE`: JSON clock state, as printed by `hlc tick`
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("HLC_NODE_ID").ok(),
            std::env::var("HLC_STATE").ok(),
        )
    }

    fn from_vars(node_id: Option<String>, state: Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(id) = node_id {
            config.node_id = Some(NodeId::new(id).context("Invalid HLC_NODE_ID")?);
        }

        if let Some(json) = state {
            let state: ClockState =
                serde_json::from_str(&json).context("Invalid HLC_STATE JSON")?;
            config.state = Some(state);
        }

        Ok(config)
    }

    /// The configured node id, or the one stored in the restored state.
    ///
    /// # Errors
    ///
    /// Returns error if `HLC_NODE_ID` and `HLC_STATE` name different nodes.
    pub fn resolve_node_id(&self) -> Result<NodeId> {
        match (&self.node_id, &self.state) {
            (Some(id), Some(state)) if *id != state.node_id => anyhow::bail!(
                "HLC_NODE_ID {id} does not match node {} in HLC_STATE",
                state.node_id
            ),
            (Some(id), _) => Ok(id.clone()),
            (None, Some(state)) => Ok(state.node_id.clone()),
            (None, None) => Ok(NodeId::random()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CliConfig::from_vars(None, None).unwrap();
        assert!(config.node_id.is_none());
        assert!(config.state.is_none());
        assert!(config.resolve_node_id().is_ok());
    }

    #[test]
    fn parses_node_and_state() {
        let config = CliConfig::from_vars(
            Some("device-A".to_string()),
            Some(r#"{"physical_time":1000,"logical_time":2,"node_id":"device-A"}"#.to_string()),
        )
        .unwrap();

        let state = config.state.clone().unwrap();
        assert_eq!(state.physical_time, 1000);
        assert_eq!(state.logical_time, 2);
        assert_eq!(config.resolve_node_id().unwrap().as_str(), "device-A");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(CliConfig::from_vars(Some("a:b".to_string()), None).is_err());
        assert!(CliConfig::from_vars(None, Some("{}".to_string())).is_err());
    }

    #[test]
    fn rejects_mismatched_node_ids() {
        let config = CliConfig::from_vars(
            Some("A".to_string()),
            Some(r#"{"physical_time":1,"logical_time":0,"node_id":"B"}"#.to_string()),
        )
        .unwrap();
        assert!(config.resolve_node_id().is_err());
    }
}
