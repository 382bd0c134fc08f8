//! The AR viewer (device camera) and its screen projection
//!
//! Screen coordinates are in pixels with the origin at the top-left corner
//! and Y growing downwards.

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// Device camera: world pose plus pinhole projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    pub pose: Pose,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            pose: Pose::IDENTITY,
            fov: 60.0_f32.to_radians(),
            near: 0.05,
            far: 100.0,
            screen_width: 1080.0,
            screen_height: 1920.0,
        }
    }
}

impl Viewer {
    /// Create a viewer with the given screen size in pixels
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width: screen_width.max(1.0),
            screen_height: screen_height.max(1.0),
            ..Default::default()
        }
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Set field of view in degrees
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees.clamp(10.0, 120.0).to_radians();
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Viewing direction (local -Z)
    pub fn forward(&self) -> Vec3 {
        self.pose.rotation * Vec3::NEG_Z
    }

    pub fn aspect(&self) -> f32 {
        self.screen_width / self.screen_height
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        self.pose.to_matrix().inverse()
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect(), self.near, self.far)
    }

    /// Project a world point to screen pixels.
    ///
    /// Returns `None` for points at or behind the camera plane.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.screen_width,
            (1.0 - ndc.y) * 0.5 * self.screen_height,
        ))
    }

    /// Convert screen coordinates to a world ray `(origin, direction)`
    pub fn screen_to_ray(&self, screen: Vec2) -> (Vec3, Vec3) {
        // Convert to normalized device coordinates
        let ndc_x = (2.0 * screen.x / self.screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen.y / self.screen_height);

        let inv_proj = self.projection_matrix().inverse();
        let inv_view = self.pose.to_matrix();

        let near_view = inv_proj * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_view = inv_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near_view = near_view.truncate() / near_view.w;
        let far_view = far_view.truncate() / far_view.w;

        let near_world = inv_view.transform_point3(near_view);
        let far_world = inv_view.transform_point3(far_view);

        (near_world, (far_world - near_world).normalize())
    }

    /// Height in pixels of the reserved band at the bottom of the screen
    pub fn dead_zone_height(&self, fraction: f32) -> f32 {
        self.screen_height * fraction
    }

    /// Whether a screen point lies inside the bottom dead-zone band
    pub fn in_dead_zone(&self, screen: Vec2, fraction: f32) -> bool {
        screen.y >= self.screen_height - self.dead_zone_height(fraction)
    }
}
