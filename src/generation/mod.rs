//! Generation collaborator: request model, prompt composition, response
//! parsing, and the async dispatcher that delivers results to a session.
//!
//! The hosted model itself sits behind the [`Generator`] trait. This crate
//! ships [`ReplayGenerator`], which serves recorded responses from disk.

pub mod config;
pub mod request;
pub mod response;
pub mod generator;
pub mod dispatch;

pub use config::GenerationConfig;
pub use request::{Density, GenerationRequest, ImagePayload, SYSTEM_INSTRUCTION};
pub use response::parse_response;
pub use generator::{Generator, ReplayGenerator};
pub use dispatch::{GenerationDispatcher, GenerationOutcome, GenerationTicket};
