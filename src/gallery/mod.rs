//! Saved builds gallery, persisted to a local JSON file

pub mod config;
pub mod project;
pub mod store;

pub use config::GalleryConfig;
pub use project::BuildProject;
pub use store::GalleryStore;
