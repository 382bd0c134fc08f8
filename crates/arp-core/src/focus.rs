//! Per-frame focus selection
//!
//! Focus is recomputed from scratch on every tick. At most one object is
//! highlighted afterwards: the nearest eligible one, ties resolved by
//! insertion order.

use crate::config::FocusConfig;
use crate::object::{ObjectArena, ObjectHandle};
use crate::render::SceneRenderer;
use crate::viewer::Viewer;

/// Result of the latest focus evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusState {
    pub candidate: Option<ObjectHandle>,
    /// Viewer distance of the candidate
    pub distance: f32,
    /// Whether the candidate projected onto the usable screen area
    pub in_view: bool,
}

impl FocusState {
    pub fn is_empty(&self) -> bool {
        self.candidate.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct FocusTracker {
    detection_radius: f32,
    /// Cosine of the half opening angle, when strict mode is on
    cone_cos: Option<f32>,
    dead_zone_fraction: f32,
    state: FocusState,
}

impl FocusTracker {
    pub fn new(config: &FocusConfig, dead_zone_fraction: f32) -> Self {
        Self {
            detection_radius: config.detection_radius,
            cone_cos: config
                .view_cone_degrees
                .map(|deg| (deg.clamp(0.0, 360.0) * 0.5).to_radians().cos()),
            dead_zone_fraction,
            state: FocusState::default(),
        }
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn focused(&self) -> Option<ObjectHandle> {
        self.state.candidate
    }

    /// Recompute focus over every enabled, free object and update highlights
    pub fn refresh(
        &mut self,
        objects: &mut ObjectArena,
        viewer: &Viewer,
        renderer: &mut dyn SceneRenderer,
    ) -> FocusState {
        let mut best: Option<(ObjectHandle, f32)> = None;
        for object in objects.iter().filter(|o| o.is_live()) {
            let position = object.pose.position;
            let distance = viewer.position().distance(position);
            if distance > self.detection_radius {
                continue;
            }
            let Some(screen) = viewer.world_to_screen(position) else {
                continue;
            };
            if viewer.in_dead_zone(screen, self.dead_zone_fraction) {
                continue;
            }
            if let Some(cone_cos) = self.cone_cos {
                let to_object = (position - viewer.position()).normalize_or_zero();
                if to_object.dot(viewer.forward()) < cone_cos {
                    continue;
                }
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((object.handle, distance));
            }
        }

        let winner = best.map(|(handle, _)| handle);
        objects.for_each_mut(|object| {
            if object.highlighted && Some(object.handle) != winner {
                object.highlighted = false;
                renderer.set_highlighted(object.handle, false);
            }
        });
        if let Some(object) = winner.and_then(|h| objects.get_mut(h)) {
            if !object.highlighted {
                object.highlighted = true;
                renderer.set_highlighted(object.handle, true);
            }
        }

        if self.state.candidate != winner {
            tracing::debug!("Focus changed: {:?} -> {:?}", self.state.candidate, winner);
        }
        self.state = match best {
            Some((handle, distance)) => FocusState {
                candidate: Some(handle),
                distance,
                in_view: true,
            },
            None => FocusState::default(),
        };
        self.state
    }

    /// Drop focus immediately if it points at `handle`
    pub fn invalidate(
        &mut self,
        handle: ObjectHandle,
        objects: &mut ObjectArena,
        renderer: &mut dyn SceneRenderer,
    ) {
        if self.state.candidate != Some(handle) {
            return;
        }
        self.state = FocusState::default();
        if let Some(object) = objects.get_mut(handle) {
            if object.highlighted {
                object.highlighted = false;
                renderer.set_highlighted(handle, false);
            }
        }
    }

    /// Forget focus without touching any object
    pub fn clear(&mut self) {
        self.state = FocusState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::object::PlacedObject;
    use crate::pose::Pose;
    use crate::render::{NullRenderer, RecordingRenderer};
    use glam::Vec3;

    fn add(arena: &mut ObjectArena, at: Vec3) -> ObjectHandle {
        arena.insert(PlacedObject::new(
            "Cube",
            Pose::from_position(at),
            Vec3::splat(0.2),
            BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
        ))
    }

    fn tracker() -> FocusTracker {
        FocusTracker::new(&FocusConfig::default(), 1.0 / 6.0)
    }

    // Viewer at the origin looking down -Z
    fn viewer() -> Viewer {
        Viewer::new(1000.0, 1000.0)
    }

    #[test]
    fn test_nearest_eligible_wins() {
        let mut arena = ObjectArena::new();
        let far = add(&mut arena, Vec3::new(0.0, 0.0, -0.9));
        let near = add(&mut arena, Vec3::new(0.1, 0.0, -0.5));
        let mut renderer = RecordingRenderer::default();

        let state = tracker().refresh(&mut arena, &viewer(), &mut renderer);

        assert_eq!(state.candidate, Some(near));
        assert!((state.distance - Vec3::new(0.1, 0.0, -0.5).length()).abs() < 1e-5);
        assert!(arena.get(near).unwrap().highlighted);
        assert!(!arena.get(far).unwrap().highlighted);
        assert_eq!(renderer.highlights, vec![(near, true)]);
    }

    #[test]
    fn test_out_of_range_and_behind_are_ignored() {
        let mut arena = ObjectArena::new();
        add(&mut arena, Vec3::new(0.0, 0.0, -1.5));
        add(&mut arena, Vec3::new(0.0, 0.0, 0.5));

        let state = tracker().refresh(&mut arena, &viewer(), &mut NullRenderer);
        assert!(state.is_empty());
        assert!(!state.in_view);
    }

    #[test]
    fn test_dead_zone_excludes_candidate() {
        let mut arena = ObjectArena::new();
        // Projects into the bottom band of the screen
        add(&mut arena, Vec3::new(0.0, -0.25, -0.5));

        let state = tracker().refresh(&mut arena, &viewer(), &mut NullRenderer);
        assert!(state.is_empty());
    }

    #[test]
    fn test_tie_goes_to_first_inserted() {
        let mut arena = ObjectArena::new();
        let first = add(&mut arena, Vec3::new(0.2, 0.0, -0.5));
        add(&mut arena, Vec3::new(-0.2, 0.0, -0.5));

        let state = tracker().refresh(&mut arena, &viewer(), &mut NullRenderer);
        assert_eq!(state.candidate, Some(first));
    }

    #[test]
    fn test_highlight_moves_with_focus() {
        let mut arena = ObjectArena::new();
        let a = add(&mut arena, Vec3::new(0.0, 0.0, -0.4));
        let b = add(&mut arena, Vec3::new(0.0, 0.1, -0.8));
        let mut tracker = tracker();
        let mut renderer = RecordingRenderer::default();

        tracker.refresh(&mut arena, &viewer(), &mut renderer);
        arena.get_mut(a).unwrap().enabled = false;
        tracker.refresh(&mut arena, &viewer(), &mut renderer);

        assert_eq!(tracker.focused(), Some(b));
        assert_eq!(renderer.highlights, vec![(a, true), (a, false), (b, true)]);
        let highlighted = arena.iter().filter(|o| o.highlighted).count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn test_view_cone_rejects_off_axis() {
        let mut arena = ObjectArena::new();
        add(&mut arena, Vec3::new(0.12, 0.0, -0.3));
        let mut strict = FocusTracker::new(
            &FocusConfig {
                view_cone_degrees: Some(30.0),
                ..Default::default()
            },
            1.0 / 6.0,
        );

        assert!(strict.refresh(&mut arena, &viewer(), &mut NullRenderer).is_empty());
        assert!(!tracker().refresh(&mut arena, &viewer(), &mut NullRenderer).is_empty());
    }

    #[test]
    fn test_invalidate_clears_only_matching_focus() {
        let mut arena = ObjectArena::new();
        let a = add(&mut arena, Vec3::new(0.0, 0.0, -0.5));
        let other = ObjectHandle::new();
        let mut tracker = tracker();
        tracker.refresh(&mut arena, &viewer(), &mut NullRenderer);

        tracker.invalidate(other, &mut arena, &mut NullRenderer);
        assert_eq!(tracker.focused(), Some(a));

        tracker.invalidate(a, &mut arena, &mut NullRenderer);
        assert!(tracker.focused().is_none());
        assert!(!arena.get(a).unwrap().highlighted);
    }
}
