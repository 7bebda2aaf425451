//! Ray picking against the resting block lattice

use glam::IVec3;

use crate::block::BlockSet;
use crate::math::{Aabb, Ray};
use super::controller::PointerEvent;

/// Nearest block hit by a pick ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockHit {
    /// Lattice position of the hit block
    pub position: IVec3,
    /// Outward normal of the face the ray entered through
    pub normal: IVec3,
    /// Distance along the ray
    pub distance: f32,
}

impl BlockHit {
    /// Turn the hit into a click on that block
    pub fn to_pointer_event(&self, modifier: bool) -> PointerEvent {
        PointerEvent {
            position: self.position,
            face_normal: Some(self.normal.as_vec3()),
            modifier,
        }
    }
}

/// Cast `ray` (in lattice space) against every block's unit cube and return
/// the closest hit.
pub fn pick(set: &BlockSet, ray: &Ray) -> Option<BlockHit> {
    let mut best: Option<BlockHit> = None;

    for block in set {
        let position = block.position();
        let aabb = Aabb::unit_cube(position);
        let Some(distance) = ray.entry_distance(&aabb) else {
            continue;
        };
        if best.is_some_and(|b| b.distance <= distance) {
            continue;
        }
        best = Some(BlockHit {
            position,
            normal: aabb.face_normal(ray.at(distance)),
            distance,
        });
    }

    best
}
