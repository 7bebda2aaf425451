//! Block data model
//!
//! A [`Block`] is one unit cube on the integer lattice. A [`BlockSet`] is an
//! immutable snapshot of blocks with unique positions; every edit produces a
//! new set so older snapshots stay valid history entries.

pub mod color;
pub mod block;
pub mod set;

pub use color::BlockColor;
pub use block::Block;
pub use set::BlockSet;
