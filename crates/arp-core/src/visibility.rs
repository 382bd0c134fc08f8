//! Surface indicator visibility
//!
//! Newly detected surfaces are shown, then hidden after a delay. Every
//! placement shows all surfaces again and restarts their timers.

use std::collections::BTreeMap;

use crate::config::VisibilityConfig;
use crate::render::SceneRenderer;
use crate::surface::{SurfaceChange, SurfaceId};

#[derive(Debug, Clone)]
pub struct VisibilityCoordinator {
    hide_delay: f64,
    /// Known surfaces and their pending hide deadline
    deadlines: BTreeMap<SurfaceId, Option<f64>>,
}

impl VisibilityCoordinator {
    pub fn new(config: &VisibilityConfig) -> Self {
        Self {
            hide_delay: config.hide_delay.max(0.0),
            deadlines: BTreeMap::new(),
        }
    }

    pub fn on_surfaces_changed(
        &mut self,
        change: &SurfaceChange,
        now: f64,
        renderer: &mut dyn SceneRenderer,
    ) {
        for id in &change.removed {
            if self.deadlines.remove(id).is_some() {
                tracing::debug!("Surface {} removed, hide timer cancelled", id);
            }
        }
        for id in &change.added {
            renderer.set_surface_visible(*id, true);
            self.deadlines.insert(*id, Some(now + self.hide_delay));
        }
    }

    /// Show every known surface and restart its hide timer
    pub fn on_placed(&mut self, now: f64, renderer: &mut dyn SceneRenderer) {
        let deadline = now + self.hide_delay;
        for (id, pending) in self.deadlines.iter_mut() {
            renderer.set_surface_visible(*id, true);
            *pending = Some(deadline);
        }
    }

    /// Hide surfaces whose deadline has passed
    pub fn poll(&mut self, now: f64, renderer: &mut dyn SceneRenderer) {
        for (id, pending) in self.deadlines.iter_mut() {
            if pending.is_some_and(|at| now >= at) {
                renderer.set_surface_visible(*id, false);
                *pending = None;
            }
        }
    }

    /// Pending hide deadline of a surface, if it is known and visible
    pub fn deadline(&self, id: SurfaceId) -> Option<f64> {
        self.deadlines.get(&id).copied().flatten()
    }

    pub fn is_known(&self, id: SurfaceId) -> bool {
        self.deadlines.contains_key(&id)
    }
}
