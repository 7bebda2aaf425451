//! Brickforge - prompt-to-voxel block builder core
//!
//! Immutable block snapshots with linear undo/redo, a scene controller that
//! animates blocks between rest and an exploded view and turns clicks into
//! edits, plus the generation, gallery and export collaborators around them.

pub mod core;
pub mod math;
pub mod block;
pub mod history;
pub mod scene;
pub mod generation;
pub mod session;
pub mod gallery;
pub mod export;
