//! Surface tracking boundary
//!
//! The plane-tracking subsystem is external. [`SurfaceTracker`] is the seam it
//! plugs into; [`PlaneTracker`] is an in-memory implementation over horizontal
//! rectangular planes used by the demo runtime and tests.

use std::fmt;

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pose::Pose;
use crate::viewer::Viewer;

/// Opaque identity of a tracked surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// A point on a tracked surface hit by a screen ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub surface: SurfaceId,
    pub pose: Pose,
    /// Distance from the viewer
    pub distance: f32,
}

/// Surfaces added and removed since the previous notification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceChange {
    pub added: Vec<SurfaceId>,
    pub removed: Vec<SurfaceId>,
}

impl SurfaceChange {
    pub fn added(id: SurfaceId) -> Self {
        Self {
            added: vec![id],
            removed: Vec::new(),
        }
    }

    pub fn removed(id: SurfaceId) -> Self {
        Self {
            added: Vec::new(),
            removed: vec![id],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// External plane-tracking service
pub trait SurfaceTracker: Send {
    /// All hits of the ray through `point` that fall inside a tracked
    /// surface polygon, in any order.
    fn cast_ray(&self, viewer: &Viewer, point: Vec2) -> Vec<SurfaceHit>;

    /// Currently tracked surfaces
    fn surfaces(&self) -> Vec<SurfaceId>;
}

/// Converts screen points into surface poses
pub struct SurfaceHitResolver {
    tracker: Box<dyn SurfaceTracker>,
}

impl SurfaceHitResolver {
    pub fn new(tracker: Box<dyn SurfaceTracker>) -> Self {
        Self { tracker }
    }

    /// Nearest valid hit under `point`, or `None` when no surface is there
    pub fn resolve(&self, viewer: &Viewer, point: Vec2) -> Option<SurfaceHit> {
        self.tracker
            .cast_ray(viewer, point)
            .into_iter()
            .filter(|hit| hit.distance.is_finite() && hit.distance >= 0.0)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.tracker.surfaces()
    }
}

/// Horizontal rectangular plane, optionally rotated about +Y
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedPlane {
    pub id: SurfaceId,
    pub center: Vec3,
    /// Half size along the plane's local X and Z axes
    pub half_extents: Vec2,
    /// Rotation about +Y in radians
    pub yaw: f32,
}

impl TrackedPlane {
    pub fn new(center: Vec3, half_extents: Vec2) -> Self {
        Self {
            id: SurfaceId::new(),
            center,
            half_extents,
            yaw: 0.0,
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Whether a point on the plane lies inside its polygon
    pub fn contains(&self, point: Vec3) -> bool {
        let local = self.rotation().inverse() * (point - self.center);
        local.x.abs() <= self.half_extents.x && local.z.abs() <= self.half_extents.y
    }

    /// Intersect a ray with this plane, restricted to the polygon
    pub fn intersect(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<Vec3> {
        let point = ray_plane_intersection(ray_origin, ray_dir, self.center, Vec3::Y)?;
        self.contains(point).then_some(point)
    }
}

/// In-memory tracker over [`TrackedPlane`]s
#[derive(Debug, Clone, Default)]
pub struct PlaneTracker {
    planes: Vec<TrackedPlane>,
}

impl PlaneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a plane
    pub fn add_plane(&mut self, plane: TrackedPlane) -> SurfaceChange {
        let id = plane.id;
        self.planes.push(plane);
        SurfaceChange::added(id)
    }

    /// Stop tracking a plane. Returns an empty change for unknown ids.
    pub fn remove_plane(&mut self, id: SurfaceId) -> SurfaceChange {
        let before = self.planes.len();
        self.planes.retain(|p| p.id != id);
        if self.planes.len() == before {
            SurfaceChange::default()
        } else {
            SurfaceChange::removed(id)
        }
    }

    pub fn planes(&self) -> &[TrackedPlane] {
        &self.planes
    }
}

impl SurfaceTracker for PlaneTracker {
    fn cast_ray(&self, viewer: &Viewer, point: Vec2) -> Vec<SurfaceHit> {
        let (origin, dir) = viewer.screen_to_ray(point);
        self.planes
            .iter()
            .filter_map(|plane| {
                plane.intersect(origin, dir).map(|position| SurfaceHit {
                    surface: plane.id,
                    pose: Pose::new(position, plane.rotation()),
                    distance: position.distance(viewer.position()),
                })
            })
            .collect()
    }

    fn surfaces(&self) -> Vec<SurfaceId> {
        self.planes.iter().map(|p| p.id).collect()
    }
}

fn ray_plane_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let denom = ray_dir.dot(plane_normal);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (plane_point - ray_origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }

    Some(ray_origin + ray_dir * t)
}
