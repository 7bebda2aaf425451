//! Scene controller: block transforms per frame and pointer edit intents

use std::collections::HashMap;

use glam::{IVec3, Vec3};

use crate::block::{Block, BlockColor, BlockSet};
use crate::core::types::Result;
use crate::math::Ray;
use super::config::SceneConfig;
use super::explosion::ExplosionCache;
use super::pick::{pick, BlockHit};
use super::transform::{ease_factor, BlockTransform};

/// A discrete click on a rendered block
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Lattice position of the clicked block
    pub position: IVec3,
    /// Outward normal of the clicked face, if the host reported one
    pub face_normal: Option<Vec3>,
    /// Alternate/modifier key held
    pub modifier: bool,
}

impl PointerEvent {
    /// Plain click: remove the block
    pub fn click(position: IVec3) -> Self {
        Self { position, face_normal: None, modifier: false }
    }

    /// Modifier click on a face: add a neighbour
    pub fn alt_click(position: IVec3, face_normal: Vec3) -> Self {
        Self { position, face_normal: Some(face_normal), modifier: true }
    }
}

/// Edit requested by a pointer event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditIntent {
    Remove { position: IVec3 },
    Add { block: Block },
}

impl EditIntent {
    /// Apply to a snapshot, producing the next one
    pub fn apply(&self, set: &BlockSet) -> Result<BlockSet> {
        match self {
            EditIntent::Remove { position } => Ok(set.remove_block(*position)),
            EditIntent::Add { block } => set.add_block(*block),
        }
    }
}

/// One block ready to draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderInstance {
    pub position: IVec3,
    pub color: BlockColor,
    pub transform: BlockTransform,
    /// Hover highlight (never shown while exploded)
    pub highlighted: bool,
}

/// Snap an arbitrary face normal to the unit lattice direction of its
/// dominant axis. Degenerate normals point up.
pub fn snap_normal(normal: Vec3) -> IVec3 {
    if !normal.is_finite() || normal.length_squared() <= f32::EPSILON {
        return IVec3::Y;
    }
    let abs = normal.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        IVec3::new(normal.x.signum() as i32, 0, 0)
    } else if abs.y >= abs.z {
        IVec3::new(0, normal.y.signum() as i32, 0)
    } else {
        IVec3::new(0, 0, normal.z.signum() as i32)
    }
}

/// The cell one step from `position` along `normal`, if it fits the lattice
fn neighbour(position: IVec3, normal: IVec3) -> Option<IVec3> {
    Some(IVec3::new(
        position.x.checked_add(normal.x)?,
        position.y.checked_add(normal.y)?,
        position.z.checked_add(normal.z)?,
    ))
}

/// Maps a block set plus the exploded flag to per-block transforms, and
/// pointer events to edit intents.
///
/// Transforms are keyed by block position. Blocks that appear start at rest
/// on the lattice; blocks that disappear are forgotten on the next tick.
pub struct SceneController {
    config: SceneConfig,
    exploded: bool,
    transforms: HashMap<IVec3, BlockTransform>,
    explosions: ExplosionCache,
    hovered: Option<IVec3>,
}

impl SceneController {
    pub fn new(config: SceneConfig) -> Self {
        let explosions = ExplosionCache::new(config.seed);
        Self {
            config,
            exploded: false,
            transforms: HashMap::new(),
            explosions,
            hovered: None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Enter or leave the exploded state.
    ///
    /// Leaving drops every cached drift target; blocks then ease home from
    /// wherever they are.
    pub fn set_exploded(&mut self, exploded: bool) {
        if self.exploded == exploded {
            return;
        }
        self.exploded = exploded;
        if !exploded {
            self.explosions.clear();
        }
        log::debug!("Scene {}", if exploded { "exploded" } else { "rebuilding" });
    }

    /// Flip the exploded state, returning the new value
    pub fn toggle_exploded(&mut self) -> bool {
        self.set_exploded(!self.exploded);
        self.exploded
    }

    pub fn set_hover(&mut self, position: Option<IVec3>) {
        self.hovered = position;
    }

    pub fn hovered(&self) -> Option<IVec3> {
        self.hovered
    }

    /// Match tracked transforms to the blocks in `set`
    pub fn sync(&mut self, set: &BlockSet) {
        self.transforms.retain(|p, _| set.contains(*p));
        self.explosions.retain(set);
        for block in set {
            self.transforms
                .entry(block.position())
                .or_insert_with(|| BlockTransform::at_rest(block.position()));
        }
        if self.hovered.is_some_and(|p| !set.contains(p)) {
            self.hovered = None;
        }
    }

    /// Advance the animation by `dt` seconds. `elapsed` is total animation
    /// time and drives the floating bob.
    pub fn tick(&mut self, set: &BlockSet, dt: f32, elapsed: f32) {
        self.sync(set);

        let position_alpha = ease_factor(dt, self.config.position_rate);
        let rotation_alpha = ease_factor(dt, self.config.rotation_rate);

        for (index, block) in set.iter().enumerate() {
            let position = block.position();
            let Some(transform) = self.transforms.get_mut(&position) else {
                continue;
            };

            if self.exploded {
                let params = self.explosions.get_or_derive(position, &self.config);
                let bob = (elapsed * self.config.float_frequency + index as f32).sin()
                    * self.config.float_amplitude;
                let target = params.drift_target + Vec3::Y * bob;

                transform.ease_position(target, position_alpha);
                transform.spin(params.rotation_axis, params.rotation_speed * dt);
            } else {
                transform.ease_position(position.as_vec3(), position_alpha);
                transform.ease_rotation_to_rest(rotation_alpha);
            }
        }
    }

    /// Current transform of the block at `position`
    pub fn transform(&self, position: IVec3) -> Option<&BlockTransform> {
        self.transforms.get(&position)
    }

    /// Drawable instances in set order. Blocks not yet ticked are drawn at rest.
    pub fn render_instances<'a>(&'a self, set: &'a BlockSet) -> impl Iterator<Item = RenderInstance> + 'a {
        set.iter().map(move |block| {
            let position = block.position();
            RenderInstance {
                position,
                color: block.color,
                transform: self
                    .transforms
                    .get(&position)
                    .copied()
                    .unwrap_or_else(|| BlockTransform::at_rest(position)),
                highlighted: !self.exploded && self.hovered == Some(position),
            }
        })
    }

    /// Translation that centers the model on the origin
    pub fn model_offset(&self, set: &BlockSet) -> Vec3 {
        -set.bounds_center()
    }

    /// Pick with a world-space ray, accounting for the centering offset.
    /// Nothing is pickable while exploded.
    pub fn pick(&self, set: &BlockSet, world_ray: &Ray) -> Option<BlockHit> {
        if self.exploded {
            return None;
        }
        let lattice_ray = Ray::new(world_ray.origin - self.model_offset(set), world_ray.direction);
        pick(set, &lattice_ray)
    }

    /// Turn a click into an edit intent.
    ///
    /// Returns `None` while exploded, or when the clicked position holds no
    /// block in `set`.
    pub fn handle_click(&self, set: &BlockSet, event: &PointerEvent) -> Option<EditIntent> {
        if self.exploded {
            log::debug!("Ignoring click at {} while exploded", event.position);
            return None;
        }
        let clicked = set.get(event.position)?;

        if event.modifier {
            let normal = snap_normal(event.face_normal.unwrap_or(Vec3::Y));
            let Some(target) = neighbour(event.position, normal) else {
                log::debug!("No lattice cell beyond {} along {}", event.position, normal);
                return None;
            };
            Some(EditIntent::Add {
                block: Block::at(target, clicked.color),
            })
        } else {
            Some(EditIntent::Remove { position: event.position })
        }
    }
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
