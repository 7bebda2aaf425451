//! Block scene: render transforms, explode/rebuild animation and click editing
//!
//! The scene never owns block data. Each frame it is handed the current
//! [`BlockSet`](crate::block::BlockSet) and eases one [`BlockTransform`] per
//! block toward either its lattice position or its exploded drift target.

pub mod config;
pub mod transform;
pub mod explosion;
pub mod pick;
pub mod controller;

pub use config::SceneConfig;
pub use transform::BlockTransform;
pub use explosion::{ExplosionCache, ExplosionParams};
pub use pick::{pick, BlockHit};
pub use controller::{EditIntent, PointerEvent, RenderInstance, SceneController};
