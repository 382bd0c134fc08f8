//! Placed objects and the arena that owns them

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::BoundingBox;
use crate::pose::Pose;

/// Stable handle of a placed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(Uuid);

impl ObjectHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object-{}", self.0)
    }
}

/// Tag membership used by stacking and focus queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectTag {
    Placed,
}

/// Whether an object is simulated in the world or carried by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhysicalState {
    #[default]
    Free,
    Held,
}

/// An object placed on a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub handle: ObjectHandle,
    /// Display name, e.g. "Cube #3"
    pub name: String,
    /// Catalog variant this object was created from
    pub variant: String,
    pub pose: Pose,
    pub scale: Vec3,
    /// Bounding box in the object's local (unscaled) frame
    pub local_bounds: BoundingBox,
    pub tag: ObjectTag,
    pub state: PhysicalState,
    pub highlighted: bool,
    pub enabled: bool,
}

impl PlacedObject {
    pub fn new(variant: impl Into<String>, pose: Pose, scale: Vec3, local_bounds: BoundingBox) -> Self {
        let variant = variant.into();
        Self {
            handle: ObjectHandle::new(),
            name: variant.clone(),
            variant,
            pose,
            scale,
            local_bounds,
            tag: ObjectTag::Placed,
            state: PhysicalState::Free,
            highlighted: false,
            enabled: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// World-space axis-aligned bounds
    pub fn world_bounds(&self) -> BoundingBox {
        self.local_bounds
            .transform(&self.pose.to_matrix_scaled(self.scale))
    }

    pub fn is_held(&self) -> bool {
        self.state == PhysicalState::Held
    }

    /// Free, enabled and tagged as placed
    pub fn is_live(&self) -> bool {
        self.enabled && self.state == PhysicalState::Free && self.tag == ObjectTag::Placed
    }
}

/// Owns every placed object, keyed by handle, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct ObjectArena {
    objects: HashMap<ObjectHandle, PlacedObject>,
    order: Vec<ObjectHandle>,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: PlacedObject) -> ObjectHandle {
        let handle = object.handle;
        if self.objects.insert(handle, object).is_none() {
            self.order.push(handle);
        }
        handle
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&PlacedObject> {
        self.objects.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut PlacedObject> {
        self.objects.get_mut(&handle)
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<PlacedObject> {
        let removed = self.objects.remove(&handle)?;
        self.order.retain(|h| *h != handle);
        Some(removed)
    }

    /// Objects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.order.iter().filter_map(|h| self.objects.get(h))
    }

    /// Visit every object mutably, in insertion order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut PlacedObject)) {
        for handle in &self.order {
            if let Some(object) = self.objects.get_mut(handle) {
                f(object);
            }
        }
    }

    pub fn handles(&self) -> &[ObjectHandle] {
        &self.order
    }

    /// Remove every object, returning them in insertion order
    pub fn drain(&mut self) -> Vec<PlacedObject> {
        let order = std::mem::take(&mut self.order);
        let drained = order
            .into_iter()
            .filter_map(|h| self.objects.remove(&h))
            .collect();
        self.objects.clear();
        drained
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(at: Vec3) -> PlacedObject {
        PlacedObject::new(
            "Cube",
            Pose::from_position(at),
            Vec3::ONE,
            BoundingBox::new(Vec3::new(-0.5, -1.0, -0.5), Vec3::new(0.5, 0.0, 0.5)),
        )
    }

    #[test]
    fn test_iter_follows_insertion_order() {
        let mut arena = ObjectArena::new();
        let a = arena.insert(cube(Vec3::ZERO));
        let b = arena.insert(cube(Vec3::X));
        let c = arena.insert(cube(Vec3::Y));
        arena.remove(b);

        let handles: Vec<_> = arena.iter().map(|o| o.handle).collect();
        assert_eq!(handles, vec![a, c]);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_for_each_mut_follows_insertion_order() {
        let mut arena = ObjectArena::new();
        let handles: Vec<_> = (0..16)
            .map(|i| arena.insert(cube(Vec3::new(i as f32, 0.0, 0.0))))
            .collect();
        arena.remove(handles[3]);

        let mut visited = Vec::new();
        arena.for_each_mut(|o| {
            o.highlighted = true;
            visited.push(o.handle);
        });

        let expected: Vec<_> = handles.iter().copied().filter(|h| *h != handles[3]).collect();
        assert_eq!(visited, expected);
        assert!(arena.iter().all(|o| o.highlighted));
    }

    #[test]
    fn test_world_bounds_follow_pose() {
        let object = cube(Vec3::new(0.0, 2.0, 0.0));
        let bounds = object.world_bounds();
        assert!((bounds.top() - 2.0).abs() < 1e-5);
        assert!((bounds.min.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_drain_empties_arena() {
        let mut arena = ObjectArena::new();
        arena.insert(cube(Vec3::ZERO));
        arena.insert(cube(Vec3::X));

        let drained = arena.drain();
        assert_eq!(drained.len(), 2);
        assert!(arena.is_empty());
        assert!(arena.iter().next().is_none());
    }

    #[test]
    fn test_held_object_is_not_live() {
        let mut object = cube(Vec3::ZERO);
        assert!(object.is_live());
        object.state = PhysicalState::Held;
        assert!(!object.is_live());
        object.state = PhysicalState::Free;
        object.enabled = false;
        assert!(!object.is_live());
    }
}
