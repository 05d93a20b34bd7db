//! Aggregate behavior configuration loadable from JSON payloads.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, FocusTrapConfig, NavigationConfig};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Defaults applied by widgets that do not override behavior per instance.
pub struct BehaviorConfig {
    /// Focus trap defaults for overlay widgets.
    pub focus_trap: FocusTrapConfig,
    /// Roving navigation defaults for list-like widgets.
    pub navigation: NavigationConfig,
}

impl BehaviorConfig {
    /// Parses a config document; absent fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}
