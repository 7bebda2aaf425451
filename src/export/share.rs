//! Social share links

use url::Url;

use crate::core::error::Error;
use crate::core::types::Result;

const TWEET_INTENT: &str = "https://twitter.com/intent/tweet";

/// Text posted when sharing a build
pub fn share_text(name: &str) -> String {
    format!("Check out my Brickforge build: \"{}\"! #Brickforge #VoxelArt", name)
}

/// Tweet-intent URL carrying the encoded share text
pub fn share_link(name: &str) -> Result<Url> {
    Url::parse_with_params(TWEET_INTENT, &[("text", share_text(name))])
        .map_err(|e| Error::Validation(format!("bad share url: {}", e)))
}
