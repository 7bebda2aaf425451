//! Generation settings

use serde::{Deserialize, Serialize};

use super::request::Density;

/// Defaults applied to generation requests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Density used when a request does not pick one
    pub density: Density,
    /// Artificial delay for [`ReplayGenerator`](super::ReplayGenerator), in milliseconds
    pub replay_latency_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            density: Density::Medium,
            replay_latency_ms: 0,
        }
    }
}
