//! Dispatcher configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime knobs for a `Dispatcher`.
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```json
/// { "slow_dispatch_ms": 250 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Consult the decorator table before the primary table.
    pub decorators: bool,
    /// Log a warning when one handler call takes longer than this.
    pub slow_dispatch_ms: Option<u64>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            decorators: true,
            slow_dispatch_ms: None,
        }
    }
}

impl DispatchConfig {
    /// Parse a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn slow_dispatch(&self) -> Option<Duration> {
        self.slow_dispatch_ms.map(Duration::from_millis)
    }
}
