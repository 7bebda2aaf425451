//! Linear undo/redo over immutable snapshots

pub mod store;

pub use store::HistoryStore;
