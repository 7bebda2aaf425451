//! Build session: the composition root that owns build history, the scene
//! controller and the generation state machine.

pub mod state;
pub mod build_session;

pub use state::GenerationState;
pub use build_session::{BuildSession, GenerationResolution};
