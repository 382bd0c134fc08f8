//! Height-accumulation stacking
//!
//! A new object lands `clearance` above the highest top face of any placed
//! object near the hit point. No physics is involved.

use glam::Vec3;

use crate::config::StackConfig;
use crate::object::ObjectArena;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackSolver {
    pub search_radius: f32,
    pub clearance: f32,
}

impl Default for StackSolver {
    fn default() -> Self {
        Self::from_config(&StackConfig::default())
    }
}

impl StackSolver {
    pub fn from_config(config: &StackConfig) -> Self {
        Self {
            search_radius: config.search_radius,
            clearance: config.clearance,
        }
    }

    /// Position for a new object placed at `base`
    pub fn next_position(&self, base: Vec3, objects: &ObjectArena) -> Vec3 {
        let max_top = objects
            .iter()
            .filter(|o| o.is_live())
            .map(|o| o.world_bounds())
            .filter(|b| b.intersects_sphere(base, self.search_radius))
            .map(|b| b.top())
            .fold(base.y, f32::max);

        Vec3::new(base.x, max_top + self.clearance, base.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::object::{PhysicalState, PlacedObject};
    use crate::pose::Pose;
    use approx::assert_relative_eq;

    fn block(arena: &mut ObjectArena, at: Vec3) -> crate::object::ObjectHandle {
        arena.insert(PlacedObject::new(
            "Block",
            Pose::from_position(at),
            Vec3::ONE,
            BoundingBox::new(Vec3::new(-0.05, -0.1, -0.05), Vec3::new(0.05, 0.0, 0.05)),
        ))
    }

    #[test]
    fn test_empty_scene_adds_clearance() {
        let solver = StackSolver::default();
        let pos = solver.next_position(Vec3::new(1.0, 0.5, -2.0), &ObjectArena::new());
        assert_relative_eq!(pos.x, 1.0);
        assert_relative_eq!(pos.y, 0.6, epsilon = 1e-6);
        assert_relative_eq!(pos.z, -2.0);
    }

    #[test]
    fn test_stacks_on_tallest_nearby() {
        let mut arena = ObjectArena::new();
        block(&mut arena, Vec3::new(0.0, 0.3, 0.0));
        block(&mut arena, Vec3::new(0.5, 0.8, 0.0));
        block(&mut arena, Vec3::new(0.2, 0.1, 0.3));

        let pos = StackSolver::default().next_position(Vec3::ZERO, &arena);
        assert_relative_eq!(pos.y, 0.9, epsilon = 1e-5);
    }

    #[test]
    fn test_ignores_objects_outside_radius() {
        let mut arena = ObjectArena::new();
        block(&mut arena, Vec3::new(5.0, 3.0, 0.0));

        let pos = StackSolver::default().next_position(Vec3::ZERO, &arena);
        assert_relative_eq!(pos.y, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_base_higher_than_neighbours_wins() {
        let mut arena = ObjectArena::new();
        block(&mut arena, Vec3::new(0.0, 0.2, 0.0));

        let pos = StackSolver::default().next_position(Vec3::new(0.0, 1.0, 0.0), &arena);
        assert_relative_eq!(pos.y, 1.1, epsilon = 1e-6);
    }

    #[test]
    fn test_held_and_disabled_objects_are_ignored() {
        let mut arena = ObjectArena::new();
        let held = block(&mut arena, Vec3::new(0.0, 1.0, 0.0));
        let hidden = block(&mut arena, Vec3::new(0.0, 2.0, 0.0));
        arena.get_mut(held).unwrap().state = PhysicalState::Held;
        arena.get_mut(hidden).unwrap().enabled = false;

        let pos = StackSolver::default().next_position(Vec3::ZERO, &arena);
        assert_relative_eq!(pos.y, 0.1, epsilon = 1e-6);
    }
}
