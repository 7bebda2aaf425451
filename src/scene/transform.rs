//! Per-block render transforms and easing

use glam::{IVec3, Mat4, Quat, Vec3};

/// Fraction of the remaining distance covered in one step of `dt` seconds.
/// Clamped to 1 so a long frame lands on the target instead of overshooting.
pub fn ease_factor(dt: f32, rate: f32) -> f32 {
    (dt * rate).clamp(0.0, 1.0)
}

/// Rendered position and orientation of one block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl BlockTransform {
    /// Resting transform: exactly on the lattice, unrotated
    pub fn at_rest(position: IVec3) -> Self {
        Self {
            position: position.as_vec3(),
            rotation: Quat::IDENTITY,
        }
    }

    /// Convert to a 4x4 model matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Move a fraction `alpha` of the way toward `target`
    pub fn ease_position(&mut self, target: Vec3, alpha: f32) {
        self.position = self.position.lerp(target, alpha);
    }

    /// Rotate a fraction `alpha` of the way back to identity
    pub fn ease_rotation_to_rest(&mut self, alpha: f32) {
        if self.rotation == Quat::IDENTITY {
            return;
        }
        self.rotation = self.rotation.slerp(Quat::IDENTITY, alpha).normalize();
    }

    /// Accumulate a spin of `angle` radians about a local axis
    pub fn spin(&mut self, axis: Vec3, angle: f32) {
        self.rotation = (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }

    /// Distance from the resting lattice position
    pub fn offset_from(&self, position: IVec3) -> f32 {
        self.position.distance(position.as_vec3())
    }

    /// Rotation angle away from identity, in radians
    pub fn rotation_angle(&self) -> f32 {
        2.0 * self.rotation.xyz().length().atan2(self.rotation.w.abs())
    }
}
