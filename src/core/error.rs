//! Error types for Brickforge

use glam::IVec3;
use thiserror::Error;

/// Main error type for the builder
#[derive(Debug, Error)]
pub enum Error {
    /// A block already occupies the target lattice position.
    #[error("Conflict: a block already occupies ({}, {}, {})", .0.x, .0.y, .0.z)]
    Conflict(IVec3),

    /// A block from an untrusted source was malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The external generator failed or returned garbage.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("A generation request is already in flight")]
    GenerationInFlight,

    #[error("Generation request needs a prompt or an image")]
    EmptyRequest,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
