//! Rigid poses (position + orientation)

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A rigid transform without scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Pose at `position` rotated about +Y so its local +Z points at `target`
    /// projected onto the horizontal plane. Pitch and roll stay level.
    pub fn facing_horizontally(position: Vec3, target: Vec3) -> Self {
        let flat = Vec3::new(target.x - position.x, 0.0, target.z - position.z);
        if flat.length_squared() <= f32::EPSILON {
            return Self::from_position(position);
        }
        let yaw = flat.x.atan2(flat.z);
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
        }
    }

    /// Pose at `eye` whose local -Z points at `target`, with no roll
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let dir = target - eye;
        let horizontal = Vec3::new(dir.x, 0.0, dir.z).length();
        if dir.length_squared() <= f32::EPSILON {
            return Self::from_position(eye);
        }
        let yaw = if horizontal > f32::EPSILON {
            (-dir.x).atan2(-dir.z)
        } else {
            0.0
        };
        let pitch = dir.y.atan2(horizontal);
        Self {
            position: eye,
            rotation: Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch),
        }
    }

    /// Compose two poses: `self ∘ local`, i.e. `local` expressed in `self`'s frame
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * local.position,
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }

    /// Inverse rigid transform
    pub fn inverse(&self) -> Pose {
        let inv_rot = self.rotation.inverse();
        Pose {
            position: inv_rot * -self.position,
            rotation: inv_rot,
        }
    }

    /// Express `world` in this pose's local frame
    pub fn relative(&self, world: &Pose) -> Pose {
        self.inverse().compose(world)
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    pub fn to_matrix_scaled(&self, scale: Vec3) -> Mat4 {
        Mat4::from_scale_rotation_translation(scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_compose_then_relative_roundtrips() {
        let parent = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(FRAC_PI_2));
        let world = Pose::new(Vec3::new(-0.5, 0.25, 4.0), Quat::from_rotation_x(0.3));

        let local = parent.relative(&world);
        let back = parent.compose(&local);

        assert_relative_eq!(back.position.x, world.position.x, epsilon = 1e-5);
        assert_relative_eq!(back.position.y, world.position.y, epsilon = 1e-5);
        assert_relative_eq!(back.position.z, world.position.z, epsilon = 1e-5);
        assert!(back.rotation.angle_between(world.rotation) < 1e-3);
    }

    #[test]
    fn test_facing_horizontally_ignores_height() {
        let pose = Pose::facing_horizontally(Vec3::ZERO, Vec3::new(1.0, 5.0, 0.0));
        let forward = pose.rotation * Vec3::Z;

        assert_relative_eq!(forward.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(forward.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_looking_at_points_forward_at_target() {
        let eye = Vec3::new(1.0, 1.4, 1.2);
        let target = Vec3::new(-0.5, 0.0, 0.3);
        let pose = Pose::looking_at(eye, target);
        let forward = pose.rotation * Vec3::NEG_Z;

        assert!(forward.dot((target - eye).normalize()) > 0.9999);
        // No roll: the local X axis stays horizontal
        assert_relative_eq!((pose.rotation * Vec3::X).y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_facing_horizontally_directly_above() {
        let pose = Pose::facing_horizontally(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(pose.rotation, Quat::IDENTITY);
    }
}
