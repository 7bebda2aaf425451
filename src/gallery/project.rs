//! Saved build records

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::block::BlockSet;

/// Milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A saved build
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildProject {
    pub id: String,
    pub name: String,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: u64,
    pub blocks: BlockSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_prompt: Option<String>,
    /// Reference image as a data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_image: Option<String>,
}

impl BuildProject {
    /// Longest project name, in characters
    pub const NAME_LIMIT: usize = 20;

    /// New project stamped with the current time. The name is cut to
    /// [`NAME_LIMIT`](Self::NAME_LIMIT) characters; a blank name becomes
    /// "Untitled Build".
    pub fn new(name: &str, blocks: BlockSet) -> Self {
        let timestamp = now_millis();
        let name: String = name.trim().chars().take(Self::NAME_LIMIT).collect();
        let name = if name.is_empty() { "Untitled Build".to_string() } else { name };

        Self {
            id: timestamp.to_string(),
            name,
            timestamp,
            blocks,
            original_prompt: None,
            original_image: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.original_prompt = Some(prompt.into());
        self
    }

    pub fn with_image(mut self, data_url: impl Into<String>) -> Self {
        self.original_image = Some(data_url.into());
        self
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockColor};
    use serde_json::json;

    #[test]
    fn test_name_rules() {
        let long = BuildProject::new("a very long castle with many towers", BlockSet::empty());
        assert_eq!(long.name.chars().count(), BuildProject::NAME_LIMIT);
        assert_eq!(long.name, "a very long castle w");

        let blank = BuildProject::new("   ", BlockSet::empty());
        assert_eq!(blank.name, "Untitled Build");
        assert_eq!(blank.id, blank.timestamp.to_string());
    }

    #[test]
    fn test_serialized_shape() {
        let blocks = BlockSet::from_blocks([Block::new(1, 2, 3, BlockColor::rgb(255, 204, 0))]);
        let mut project = BuildProject::new("duck", blocks).with_prompt("a yellow duck");
        project.id = "42".to_string();
        project.timestamp = 42;

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "42",
                "name": "duck",
                "timestamp": 42,
                "blocks": [{"x": 1, "y": 2, "z": 3, "color": "#FFCC00"}],
                "originalPrompt": "a yellow duck"
            })
        );

        let back: BuildProject = serde_json::from_value(value).unwrap();
        assert_eq!(back, project);
        assert_eq!(back.block_count(), 1);
    }
}
