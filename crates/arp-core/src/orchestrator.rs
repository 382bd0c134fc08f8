//! Place-request handling
//!
//! gate -> surface hit -> stack height -> next variant -> new object. The
//! whole sequence runs under one `&mut` borrow, so nothing can interleave
//! between the admission check and the cooldown update.

use glam::Vec2;

use crate::catalog::PrefabCatalog;
use crate::events::{EventQueue, SceneEvent};
use crate::gate::{GateRejection, PlacementGate};
use crate::object::{ObjectArena, ObjectHandle, PlacedObject};
use crate::pose::Pose;
use crate::stack::StackSolver;
use crate::surface::SurfaceHitResolver;
use crate::viewer::Viewer;

/// A tap on the screen asking for a new object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceRequest {
    /// Screen point in pixels, top-left origin
    pub point: Vec2,
    /// Whether a UI element owns the pointer
    pub over_ui: bool,
}

impl PlaceRequest {
    pub fn at(point: Vec2) -> Self {
        Self {
            point,
            over_ui: false,
        }
    }

    pub fn over_ui(point: Vec2) -> Self {
        Self {
            point,
            over_ui: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    Placed {
        handle: ObjectHandle,
        variant: String,
        pose: Pose,
    },
    RejectedByGate(GateRejection),
    NoSurface,
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed { .. })
    }

    pub fn handle(&self) -> Option<ObjectHandle> {
        match self {
            PlacementOutcome::Placed { handle, .. } => Some(*handle),
            _ => None,
        }
    }
}

/// Borrowed session state a placement needs
pub struct PlacementContext<'a> {
    pub objects: &'a mut ObjectArena,
    pub viewer: &'a Viewer,
    pub holding: bool,
    pub events: &'a mut EventQueue,
}

pub struct PlacementOrchestrator {
    gate: PlacementGate,
    solver: StackSolver,
    resolver: Option<SurfaceHitResolver>,
    catalog: Option<PrefabCatalog>,
    placed_count: u64,
}

impl PlacementOrchestrator {
    /// A missing resolver or catalog marks the gate as faulted
    pub fn new(
        mut gate: PlacementGate,
        solver: StackSolver,
        resolver: Option<SurfaceHitResolver>,
        catalog: Option<PrefabCatalog>,
    ) -> Self {
        if resolver.is_none() || catalog.is_none() {
            gate.mark_faulted();
        }
        Self {
            gate,
            solver,
            resolver,
            catalog,
            placed_count: 0,
        }
    }

    pub fn on_place_request(
        &mut self,
        request: PlaceRequest,
        now: f64,
        ctx: PlacementContext<'_>,
    ) -> PlacementOutcome {
        if let Err(reason) =
            self.gate
                .evaluate(request.point, request.over_ui, ctx.holding, ctx.viewer, now)
        {
            return PlacementOutcome::RejectedByGate(reason);
        }

        let (Some(resolver), Some(catalog)) = (self.resolver.as_ref(), self.catalog.as_mut())
        else {
            return PlacementOutcome::RejectedByGate(GateRejection::Unavailable);
        };

        let Some(hit) = resolver.resolve(ctx.viewer, request.point) else {
            tracing::debug!("No surface under {:?}", request.point);
            return PlacementOutcome::NoSurface;
        };

        let position = self.solver.next_position(hit.pose.position, ctx.objects);
        let variant = catalog.next().clone();
        let pose = Pose::facing_horizontally(position, ctx.viewer.position());

        self.placed_count += 1;
        let object = PlacedObject::new(
            variant.name.clone(),
            pose,
            variant.scale_vec(),
            variant.local_bounds(),
        )
        .with_name(format!("{} #{}", variant.name, self.placed_count));
        let name = object.name.clone();
        let handle = ctx.objects.insert(object);
        self.gate.record_placement(now);

        tracing::info!(
            "Placed {} on {} at ({:.3}, {:.3}, {:.3})",
            name,
            hit.surface,
            position.x,
            position.y,
            position.z
        );
        ctx.events.queue(SceneEvent::Placed {
            handle,
            variant: variant.name.clone(),
            pose,
        });

        PlacementOutcome::Placed {
            handle,
            variant: variant.name,
            pose,
        }
    }

    pub fn gate(&self) -> &PlacementGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut PlacementGate {
        &mut self.gate
    }

    pub fn catalog(&self) -> Option<&PrefabCatalog> {
        self.catalog.as_ref()
    }

    pub fn resolver(&self) -> Option<&SurfaceHitResolver> {
        self.resolver.as_ref()
    }

    /// Objects placed since the session started
    pub fn placed_count(&self) -> u64 {
        self.placed_count
    }
}
