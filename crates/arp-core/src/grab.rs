//! Picking up and putting down placed objects
//!
//! A held object follows the viewer at the offset it had when it was grabbed.
//! While anything is held, placement is switched off.

use glam::Quat;

use crate::config::GrabConfig;
use crate::focus::FocusTracker;
use crate::gate::PlacementGate;
use crate::object::{ObjectArena, ObjectHandle, PhysicalState};
use crate::pose::Pose;
use crate::render::SceneRenderer;
use crate::viewer::Viewer;

/// The held-object relationship
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeldState {
    pub held: Option<ObjectHandle>,
    /// Object pose relative to the viewer, captured at grab time
    pub anchor: Pose,
    /// World rotation before the grab, restored on drop
    pub original_rotation: Quat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabOutcome {
    Grabbed(ObjectHandle),
    NothingFocused,
    AlreadyHolding(ObjectHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Dropped(ObjectHandle),
    NotHolding,
}

#[derive(Debug, Clone)]
pub struct GrabController {
    drop_guard: f64,
    state: HeldState,
}

impl GrabController {
    pub fn new(config: &GrabConfig) -> Self {
        Self {
            drop_guard: config.drop_guard.max(0.0),
            state: HeldState::default(),
        }
    }

    pub fn state(&self) -> HeldState {
        self.state
    }

    pub fn held(&self) -> Option<ObjectHandle> {
        self.state.held
    }

    pub fn is_holding(&self) -> bool {
        self.state.held.is_some()
    }

    /// Pick up the focused object
    pub fn grab(
        &mut self,
        focus: &mut FocusTracker,
        objects: &mut ObjectArena,
        viewer: &Viewer,
        gate: &mut PlacementGate,
        renderer: &mut dyn SceneRenderer,
    ) -> GrabOutcome {
        if let Some(held) = self.state.held {
            return GrabOutcome::AlreadyHolding(held);
        }

        let target = focus.focused().filter(|h| objects.contains(*h));
        let Some(handle) = target else {
            gate.enable();
            tracing::debug!("Grab ignored: nothing focused");
            return GrabOutcome::NothingFocused;
        };

        focus.invalidate(handle, objects, renderer);
        let Some(object) = objects.get_mut(handle) else {
            gate.enable();
            return GrabOutcome::NothingFocused;
        };

        object.state = PhysicalState::Held;
        self.state = HeldState {
            held: Some(handle),
            anchor: viewer.pose.relative(&object.pose),
            original_rotation: object.pose.rotation,
        };
        gate.disable();

        tracing::info!("Grabbed {} ({})", object.name, handle);
        GrabOutcome::Grabbed(handle)
    }

    /// Put the held object down where it is
    pub fn drop(
        &mut self,
        objects: &mut ObjectArena,
        gate: &mut PlacementGate,
        now: f64,
    ) -> DropOutcome {
        let Some(handle) = self.state.held else {
            return DropOutcome::NotHolding;
        };
        let original_rotation = self.state.original_rotation;
        self.state = HeldState::default();
        gate.enable_after(now, self.drop_guard);

        match objects.get_mut(handle) {
            Some(object) => {
                object.state = PhysicalState::Free;
                object.pose.rotation = original_rotation;
                tracing::info!("Dropped {} at {:?}", object.name, object.pose.position);
                DropOutcome::Dropped(handle)
            }
            None => {
                tracing::warn!("Held object {} vanished before drop", handle);
                DropOutcome::NotHolding
            }
        }
    }

    /// Move the held object along with the viewer
    pub fn update(&self, viewer: &Viewer, objects: &mut ObjectArena) {
        let Some(handle) = self.state.held else {
            return;
        };
        if let Some(object) = objects.get_mut(handle).filter(|o| o.is_held()) {
            object.pose = viewer.pose.compose(&self.state.anchor);
        }
    }

    /// Forget the held object without touching it (used when it is destroyed)
    pub fn release(&mut self, handle: ObjectHandle) -> bool {
        if self.state.held == Some(handle) {
            self.state = HeldState::default();
            true
        } else {
            false
        }
    }

    /// Forget any held object
    pub fn clear(&mut self) {
        self.state = HeldState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::config::{FocusConfig, PlacementConfig};
    use crate::gate::GateRejection;
    use crate::object::PlacedObject;
    use crate::render::NullRenderer;
    use approx::assert_relative_eq;
    use glam::{Vec2, Vec3};

    struct Fixture {
        controller: GrabController,
        focus: FocusTracker,
        objects: ObjectArena,
        gate: PlacementGate,
        viewer: Viewer,
    }

    fn fixture() -> Fixture {
        Fixture {
            controller: GrabController::new(&GrabConfig::default()),
            focus: FocusTracker::new(&FocusConfig::default(), 1.0 / 6.0),
            objects: ObjectArena::new(),
            gate: PlacementGate::new(&PlacementConfig::default()),
            viewer: Viewer::new(1000.0, 1000.0),
        }
    }

    impl Fixture {
        fn add(&mut self, at: Vec3, rotation: Quat) -> ObjectHandle {
            self.objects.insert(PlacedObject::new(
                "Cube",
                Pose::new(at, rotation),
                Vec3::splat(0.2),
                BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
            ))
        }

        fn refresh(&mut self) {
            self.focus
                .refresh(&mut self.objects, &self.viewer, &mut NullRenderer);
        }

        fn grab(&mut self) -> GrabOutcome {
            self.controller.grab(
                &mut self.focus,
                &mut self.objects,
                &self.viewer,
                &mut self.gate,
                &mut NullRenderer,
            )
        }
    }

    #[test]
    fn test_grab_without_focus_is_noop() {
        let mut f = fixture();
        f.gate.disable();

        assert_eq!(f.grab(), GrabOutcome::NothingFocused);
        assert!(!f.controller.is_holding());
        assert!(f.gate.is_enabled());
    }

    #[test]
    fn test_grab_without_focus_cuts_drop_guard_short() {
        let mut f = fixture();
        f.gate.enable_after(1.0, 0.2);
        assert!(!f.gate.is_enabled());

        assert_eq!(f.grab(), GrabOutcome::NothingFocused);
        assert!(f.gate.is_enabled());
        assert_eq!(
            f.gate.evaluate(Vec2::new(500.0, 500.0), false, false, &f.viewer, 1.05),
            Ok(())
        );
    }

    #[test]
    fn test_update_leaves_released_object_alone() {
        let mut f = fixture();
        let h = f.add(Vec3::new(0.0, 0.0, -0.5), Quat::IDENTITY);
        f.refresh();
        f.grab();
        f.objects.get_mut(h).unwrap().state = PhysicalState::Free;

        f.viewer.pose = Pose::from_position(Vec3::new(2.0, 0.0, 0.0));
        f.controller.update(&f.viewer, &mut f.objects);

        assert_eq!(
            f.objects.get(h).unwrap().pose.position,
            Vec3::new(0.0, 0.0, -0.5)
        );
    }

    #[test]
    fn test_grab_marks_held_and_disables_placement() {
        let mut f = fixture();
        let h = f.add(Vec3::new(0.0, 0.0, -0.5), Quat::IDENTITY);
        f.refresh();

        assert_eq!(f.grab(), GrabOutcome::Grabbed(h));
        let object = f.objects.get(h).unwrap();
        assert_eq!(object.state, PhysicalState::Held);
        assert!(!object.highlighted);
        assert!(f.focus.focused().is_none());
        assert_eq!(
            f.gate.evaluate(Vec2::new(500.0, 500.0), false, true, &f.viewer, 10.0),
            Err(GateRejection::PlacementDisabled)
        );
        assert_eq!(f.grab(), GrabOutcome::AlreadyHolding(h));
    }

    #[test]
    fn test_held_object_follows_viewer() {
        let mut f = fixture();
        let h = f.add(Vec3::new(0.0, 0.0, -0.5), Quat::IDENTITY);
        f.refresh();
        f.grab();

        f.viewer.pose = Pose::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        f.controller.update(&f.viewer, &mut f.objects);

        // Half a meter in front of a viewer that now faces -X
        let position = f.objects.get(h).unwrap().pose.position;
        assert_relative_eq!(position.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(position.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_drop_restores_rotation_and_schedules_resume() {
        let mut f = fixture();
        let rotation = Quat::from_rotation_y(0.7);
        let h = f.add(Vec3::new(0.0, 0.0, -0.5), rotation);
        f.refresh();
        f.grab();

        f.viewer.pose = Pose::new(Vec3::new(0.2, 0.0, 0.0), Quat::from_rotation_y(0.3));
        f.controller.update(&f.viewer, &mut f.objects);
        let carried_to = f.objects.get(h).unwrap().pose.position;

        assert_eq!(
            f.controller.drop(&mut f.objects, &mut f.gate, 3.0),
            DropOutcome::Dropped(h)
        );
        let object = f.objects.get(h).unwrap();
        assert_eq!(object.state, PhysicalState::Free);
        assert_eq!(object.pose.position, carried_to);
        assert!(object.pose.rotation.angle_between(rotation) < 1e-4);

        assert!(!f.gate.is_enabled());
        f.gate.poll(3.25);
        assert!(f.gate.is_enabled());
    }

    #[test]
    fn test_drop_while_idle() {
        let mut f = fixture();
        assert_eq!(
            f.controller.drop(&mut f.objects, &mut f.gate, 0.0),
            DropOutcome::NotHolding
        );
        assert!(f.gate.is_enabled());
    }
}
