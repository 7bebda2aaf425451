//! Top-level configuration, loaded from a JSON file

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::gallery::GalleryConfig;
use crate::generation::GenerationConfig;
use crate::scene::SceneConfig;

/// Builder configuration. Every field falls back to its default, so a config
/// file only needs the keys it overrides.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scene: SceneConfig,
    pub gallery: GalleryConfig,
    pub generation: GenerationConfig,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
