//! Scene animation configuration

use serde::{Deserialize, Serialize};

/// Tuning constants for the explode/rebuild animation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Outward displacement factor applied to the lattice position
    pub explode_scale: f32,
    /// Constant upward drift added to every exploded block
    pub upward_bias: f32,
    /// Extra random upward drift, in `[0, upward_jitter)`
    pub upward_jitter: f32,
    /// Random horizontal drift, in `[-h/2, h/2)` on x and z
    pub horizontal_jitter: f32,
    /// Spin speed bound in radians per second
    pub max_rotation_speed: f32,
    /// Position convergence rate (per second)
    pub position_rate: f32,
    /// Rotation convergence rate when rebuilding (per second)
    pub rotation_rate: f32,
    /// Height of the floating bob while exploded
    pub float_amplitude: f32,
    /// Angular frequency of the floating bob
    pub float_frequency: f32,
    /// Base seed for explosion parameters
    pub seed: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            explode_scale: 1.5,
            upward_bias: 5.0,
            upward_jitter: 3.0,
            horizontal_jitter: 2.0,
            max_rotation_speed: 1.0,
            position_rate: 2.5,
            rotation_rate: 4.0,
            float_amplitude: 0.1,
            float_frequency: 0.5,
            seed: 0x5EED,
        }
    }
}
