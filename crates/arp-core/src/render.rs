//! Rendering boundary
//!
//! Highlight and surface-indicator changes are fire-and-forget calls into an
//! external renderer.

use crate::object::ObjectHandle;
use crate::surface::SurfaceId;

pub trait SceneRenderer: Send {
    fn set_highlighted(&mut self, handle: ObjectHandle, highlighted: bool);

    fn set_surface_visible(&mut self, surface: SurfaceId, visible: bool);
}

/// Renderer that discards every call
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl SceneRenderer for NullRenderer {
    fn set_highlighted(&mut self, _handle: ObjectHandle, _highlighted: bool) {}

    fn set_surface_visible(&mut self, _surface: SurfaceId, _visible: bool) {}
}

/// Renderer that records calls, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub highlights: Vec<(ObjectHandle, bool)>,
    pub surfaces: Vec<(SurfaceId, bool)>,
}

#[cfg(test)]
impl SceneRenderer for RecordingRenderer {
    fn set_highlighted(&mut self, handle: ObjectHandle, highlighted: bool) {
        self.highlights.push((handle, highlighted));
    }

    fn set_surface_visible(&mut self, surface: SurfaceId, visible: bool) {
        self.surfaces.push((surface, visible));
    }
}
