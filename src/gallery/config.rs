//! Gallery storage configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the gallery lives
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// JSON file holding every namespace
    pub path: PathBuf,
    /// Key under which this app's projects are stored
    pub namespace: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("brickforge_gallery.json"),
            namespace: "brickforge_gallery".to_string(),
        }
    }
}
