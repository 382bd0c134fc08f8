//! Axis-aligned boxes for stacking queries.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box in local or world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Height of the upper face
    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Touching counts as overlapping.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }

    /// Smallest axis-aligned box holding all eight transformed corners.
    pub fn transform(&self, matrix: &Mat4) -> BoundingBox {
        let (lo, hi) = (self.min, self.max);
        (0..8u8)
            .map(|i| {
                let corner = Vec3::new(
                    if i & 1 == 0 { lo.x } else { hi.x },
                    if i & 2 == 0 { lo.y } else { hi.y },
                    if i & 4 == 0 { lo.z } else { hi.z },
                );
                matrix.transform_point3(corner)
            })
            .fold(
                BoundingBox::new(Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
                |acc, p| BoundingBox::new(acc.min.min(p), acc.max.max(p)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_sphere() {
        let bbox = BoundingBox::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(bbox.intersects_sphere(Vec3::ZERO, 0.1));
        assert!(bbox.intersects_sphere(Vec3::new(3.0, 0.5, 0.0), 2.0));
        assert!(!bbox.intersects_sphere(Vec3::new(3.5, 0.5, 0.0), 2.0));
    }

    #[test]
    fn test_rotated_box_widens_but_keeps_top() {
        let bbox = BoundingBox::new(Vec3::new(-1.0, 0.0, -0.1), Vec3::new(1.0, 0.5, 0.1));
        let rotated = bbox.transform(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4));
        assert!(rotated.max.z - rotated.min.z > 0.2);
        assert!((rotated.top() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_translated_and_scaled_box() {
        let bbox = BoundingBox::new(Vec3::new(-0.5, -1.0, -0.5), Vec3::new(0.5, 0.0, 0.5));
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::splat(0.2),
            glam::Quat::IDENTITY,
            Vec3::new(1.0, 0.3, 0.0),
        );
        let world = bbox.transform(&matrix);
        assert!((world.top() - 0.3).abs() < 1e-6);
        assert!((world.min.y - 0.1).abs() < 1e-6);
        assert!((world.min.x - 0.9).abs() < 1e-6);
    }
}
