//! The generator seam and a replaying implementation

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

use crate::core::error::Error;
use crate::core::types::Result;
use super::config::GenerationConfig;
use super::request::GenerationRequest;
use super::response::parse_response;

/// Turns a prompt or image into raw, unvalidated block entries.
///
/// Implementations report any upstream problem (missing credentials, network
/// failure, unparseable output) as [`Error::Generation`].
pub trait Generator: Send + Sync + 'static {
    fn generate(&self, request: GenerationRequest) -> impl Future<Output = Result<Vec<Value>>> + Send;
}

/// Serves a recorded generator response from a JSON file.
#[derive(Clone, Debug)]
pub struct ReplayGenerator {
    path: PathBuf,
    latency: Duration,
}

impl ReplayGenerator {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            latency: Duration::ZERO,
        }
    }

    pub fn from_config(path: impl AsRef<Path>, config: &GenerationConfig) -> Self {
        Self::new(path).with_latency(Duration::from_millis(config.replay_latency_ms))
    }

    /// Delay every response, to exercise in-flight handling
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Generator for ReplayGenerator {
    fn generate(&self, request: GenerationRequest) -> impl Future<Output = Result<Vec<Value>>> + Send {
        let path = self.path.clone();
        let latency = self.latency;

        async move {
            log::info!(
                "Replaying generation of {:?} ({} density) from {}",
                request.build_name(), request.density, path.display()
            );
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Error::Generation(format!("cannot read {}: {}", path.display(), e)))?;
            parse_response(&text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Density;

    #[tokio::test]
    async fn test_replay_reads_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("castle.json");
        std::fs::write(&path, r##"{"blocks":[{"x":0,"y":0,"z":0,"color":"#AA0000"}]}"##).unwrap();

        let generator = ReplayGenerator::new(&path).with_latency(Duration::from_millis(5));
        let raw = generator
            .generate(GenerationRequest::from_prompt("castle", Density::Low))
            .await
            .unwrap();
        assert_eq!(raw.len(), 1);
    }

    #[tokio::test]
    async fn test_replay_missing_file_is_generation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ReplayGenerator::new(dir.path().join("nope.json"));
        let err = generator
            .generate(GenerationRequest::from_prompt("castle", Density::Low))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }
}
