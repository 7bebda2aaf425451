//! Axis-aligned bounding box

use crate::core::types::{IVec3, Vec3};

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The unit cube occupied by a block at a lattice position.
    /// Block centers sit on integer coordinates.
    pub fn unit_cube(position: IVec3) -> Self {
        let center = position.as_vec3();
        Self {
            min: center - Vec3::splat(0.5),
            max: center + Vec3::splat(0.5),
        }
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get half-extents
    pub fn half_extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if point is inside AABB
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Outward normal of the face closest to a point on (or near) the surface.
    ///
    /// The point is normalized against the half-extents so that the axis with
    /// the largest relative offset from the center wins.
    pub fn face_normal(&self, point: Vec3) -> IVec3 {
        let half = self.half_extent().max(Vec3::splat(f32::EPSILON));
        let rel = (point - self.center()) / half;
        let abs = rel.abs();

        if abs.x >= abs.y && abs.x >= abs.z {
            IVec3::new(if rel.x >= 0.0 { 1 } else { -1 }, 0, 0)
        } else if abs.y >= abs.z {
            IVec3::new(0, if rel.y >= 0.0 { 1 } else { -1 }, 0)
        } else {
            IVec3::new(0, 0, if rel.z >= 0.0 { 1 } else { -1 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cube_is_centered_on_lattice() {
        let aabb = Aabb::unit_cube(IVec3::new(2, -1, 0));
        assert_eq!(aabb.center(), Vec3::new(2.0, -1.0, 0.0));
        assert_eq!(aabb.half_extent(), Vec3::splat(0.5));
        assert!(aabb.contains_point(Vec3::new(2.5, -0.5, 0.0)));
        assert!(!aabb.contains_point(Vec3::new(2.6, -1.0, 0.0)));
    }

    #[test]
    fn test_face_normal_per_axis() {
        let aabb = Aabb::unit_cube(IVec3::ZERO);
        assert_eq!(aabb.face_normal(Vec3::new(0.5, 0.1, -0.2)), IVec3::X);
        assert_eq!(aabb.face_normal(Vec3::new(-0.5, 0.1, 0.2)), IVec3::NEG_X);
        assert_eq!(aabb.face_normal(Vec3::new(0.1, 0.5, 0.2)), IVec3::Y);
        assert_eq!(aabb.face_normal(Vec3::new(0.1, -0.5, 0.2)), IVec3::NEG_Y);
        assert_eq!(aabb.face_normal(Vec3::new(0.1, 0.3, 0.5)), IVec3::Z);
        assert_eq!(aabb.face_normal(Vec3::new(0.1, 0.3, -0.5)), IVec3::NEG_Z);
    }
}
