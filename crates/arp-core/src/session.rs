//! A placement session
//!
//! [`Session`] owns every piece of per-session state: placed objects, focus,
//! the held object, the placement gate and catalog cursor, and the surface
//! visibility timers. Input events mutate it through `&mut self`; [`Session::tick`]
//! runs once per frame in this order:
//!
//! 1. resume placement if a guard deadline passed
//! 2. move the held object with the viewer
//! 3. recompute focus
//! 4. hide surfaces whose timers expired
//! 5. deliver queued events

use crate::catalog::{PrefabCatalog, VariantDescriptor};
use crate::config::SessionConfig;
use crate::events::{EventQueue, SceneEvent, SceneObserver};
use crate::focus::{FocusState, FocusTracker};
use crate::gate::PlacementGate;
use crate::grab::{DropOutcome, GrabController, GrabOutcome, HeldState};
use crate::object::{ObjectArena, ObjectHandle, PlacedObject};
use crate::orchestrator::{PlaceRequest, PlacementContext, PlacementOrchestrator, PlacementOutcome};
use crate::render::SceneRenderer;
use crate::stack::StackSolver;
use crate::surface::{SurfaceChange, SurfaceHitResolver, SurfaceTracker};
use crate::viewer::Viewer;
use crate::visibility::VisibilityCoordinator;

/// Configuration problems that switch placement off for the whole session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionFault {
    #[error("Prefab catalog is empty; placement disabled")]
    EmptyCatalog,
    #[error("No surface tracker available; placement disabled")]
    TrackerUnavailable,
}

pub struct Session {
    config: SessionConfig,
    viewer: Viewer,
    objects: ObjectArena,
    orchestrator: PlacementOrchestrator,
    focus: FocusTracker,
    grab: GrabController,
    visibility: VisibilityCoordinator,
    renderer: Box<dyn SceneRenderer>,
    events: EventQueue,
    observers: Vec<Box<dyn SceneObserver>>,
    faults: Vec<SessionFault>,
    last_tick: f64,
}

impl Session {
    /// Build a session. Surfaces the tracker already knows about are shown
    /// immediately and get their hide timer started at time zero.
    pub fn new(
        config: SessionConfig,
        variants: Vec<VariantDescriptor>,
        tracker: Option<Box<dyn SurfaceTracker>>,
        renderer: Box<dyn SceneRenderer>,
    ) -> Self {
        let mut faults = Vec::new();

        let catalog = match PrefabCatalog::load(variants, &config.placement.priority) {
            Ok(catalog) => Some(catalog),
            Err(_) => {
                faults.push(SessionFault::EmptyCatalog);
                None
            }
        };
        if tracker.is_none() {
            faults.push(SessionFault::TrackerUnavailable);
        }
        for fault in &faults {
            tracing::error!("{}", fault);
        }

        let resolver = tracker.map(SurfaceHitResolver::new);
        let initial = SurfaceChange {
            added: resolver.as_ref().map(|r| r.surfaces()).unwrap_or_default(),
            removed: Vec::new(),
        };

        let orchestrator = PlacementOrchestrator::new(
            PlacementGate::new(&config.placement),
            StackSolver::from_config(&config.stack),
            resolver,
            catalog,
        );

        let mut session = Self {
            viewer: Viewer::default(),
            objects: ObjectArena::new(),
            orchestrator,
            focus: FocusTracker::new(&config.focus, config.placement.dead_zone_fraction),
            grab: GrabController::new(&config.grab),
            visibility: VisibilityCoordinator::new(&config.visibility),
            renderer,
            events: EventQueue::new(),
            observers: Vec::new(),
            faults,
            last_tick: 0.0,
            config,
        };
        if !initial.is_empty() {
            session.surfaces_changed(&initial, 0.0);
        }
        session
    }

    /// Handle a tap on the screen
    pub fn place(&mut self, request: PlaceRequest, now: f64) -> PlacementOutcome {
        let outcome = self.orchestrator.on_place_request(
            request,
            now,
            PlacementContext {
                objects: &mut self.objects,
                viewer: &self.viewer,
                holding: self.grab.is_holding(),
                events: &mut self.events,
            },
        );
        self.deliver_events(now);
        outcome
    }

    /// Pick up the focused object
    pub fn grab(&mut self, now: f64) -> GrabOutcome {
        let outcome = self.grab.grab(
            &mut self.focus,
            &mut self.objects,
            &self.viewer,
            self.orchestrator.gate_mut(),
            self.renderer.as_mut(),
        );
        if let GrabOutcome::Grabbed(handle) = outcome {
            self.events.queue(SceneEvent::ObjectGrabbed(handle));
        }
        self.deliver_events(now);
        outcome
    }

    /// Put down the held object
    pub fn drop(&mut self, now: f64) -> DropOutcome {
        let outcome = self
            .grab
            .drop(&mut self.objects, self.orchestrator.gate_mut(), now);
        if let DropOutcome::Dropped(handle) = outcome {
            self.events.queue(SceneEvent::ObjectDropped(handle));
        }
        self.deliver_events(now);
        outcome
    }

    /// Destroy every placed object. Placement resumes after the reset guard.
    pub fn reset(&mut self, now: f64) -> usize {
        self.orchestrator.gate_mut().disable();

        let removed = self.objects.drain().len();
        self.focus.clear();
        self.grab.clear();

        let guard = self.config.placement.reset_guard;
        self.orchestrator.gate_mut().enable_after(now, guard);

        tracing::info!("Scene reset: {} objects removed", removed);
        self.events.queue(SceneEvent::SceneReset { removed });
        self.deliver_events(now);
        removed
    }

    /// Destroy a single object
    pub fn remove_object(&mut self, handle: ObjectHandle) -> Option<PlacedObject> {
        self.focus
            .invalidate(handle, &mut self.objects, self.renderer.as_mut());
        if self.grab.release(handle) {
            self.orchestrator.gate_mut().enable();
        }

        let removed = self.objects.remove(handle)?;
        tracing::info!("Removed {}", removed.name);
        self.events.queue(SceneEvent::ObjectRemoved(handle));
        self.deliver_events(self.last_tick);
        Some(removed)
    }

    /// Enable or disable an object. Disabled objects never take focus and are
    /// ignored by stacking. Returns false for unknown handles.
    pub fn set_object_enabled(&mut self, handle: ObjectHandle, enabled: bool) -> bool {
        if !enabled {
            self.focus
                .invalidate(handle, &mut self.objects, self.renderer.as_mut());
        }
        match self.objects.get_mut(handle) {
            Some(object) => {
                object.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Surfaces were added or removed by the tracker
    pub fn surfaces_changed(&mut self, change: &SurfaceChange, now: f64) {
        if !change.added.is_empty() {
            tracing::debug!("{} surface(s) detected", change.added.len());
        }
        self.visibility
            .on_surfaces_changed(change, now, self.renderer.as_mut());
    }

    pub fn set_viewer(&mut self, viewer: Viewer) {
        self.viewer = viewer;
    }

    /// Per-frame update
    pub fn tick(&mut self, now: f64) {
        self.last_tick = now;
        self.orchestrator.gate_mut().poll(now);
        self.grab.update(&self.viewer, &mut self.objects);
        self.focus
            .refresh(&mut self.objects, &self.viewer, self.renderer.as_mut());
        self.visibility.poll(now, self.renderer.as_mut());
        self.deliver_events(now);
    }

    /// Register an observer; it receives events after the visibility
    /// coordinator and after earlier observers.
    pub fn subscribe(&mut self, observer: Box<dyn SceneObserver>) {
        self.observers.push(observer);
    }

    fn deliver_events(&mut self, now: f64) {
        for event in self.events.take() {
            if let SceneEvent::Placed { .. } = event {
                self.visibility.on_placed(now, self.renderer.as_mut());
            }
            for observer in self.observers.iter_mut() {
                observer.on_event(&event, now);
            }
        }
    }

    /// Objects placed since the session started
    pub fn placed_count(&self) -> u64 {
        self.orchestrator.placed_count()
    }

    pub fn faults(&self) -> &[SessionFault] {
        &self.faults
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn objects(&self) -> &ObjectArena {
        &self.objects
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&PlacedObject> {
        self.objects.get(handle)
    }

    pub fn focus(&self) -> FocusState {
        self.focus.state()
    }

    pub fn held(&self) -> HeldState {
        self.grab.state()
    }

    pub fn is_holding(&self) -> bool {
        self.grab.is_holding()
    }

    pub fn placement_enabled(&self) -> bool {
        self.orchestrator.gate().is_enabled()
    }

    /// Variant the next placement will use
    pub fn next_variant(&self) -> Option<&VariantDescriptor> {
        self.orchestrator.catalog().map(|c| c.peek())
    }

    pub fn visibility(&self) -> &VisibilityCoordinator {
        &self.visibility
    }
}
