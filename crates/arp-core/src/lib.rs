//! Placement and interaction core for AR surface placement
//!
//! Everything in this crate is driven from a single thread: input events are
//! applied through [`Session`] methods, and [`Session::tick`] runs the per-frame
//! recomputation. No method blocks; delays are deadlines on the session clock.

pub mod bounds;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod events;
pub mod focus;
pub mod gate;
pub mod grab;
pub mod object;
pub mod orchestrator;
pub mod pose;
pub mod render;
pub mod session;
pub mod stack;
pub mod surface;
pub mod viewer;
pub mod visibility;

pub use bounds::BoundingBox;
pub use catalog::{CatalogError, PrefabCatalog, VariantDescriptor};
pub use config::{
    FocusConfig, GrabConfig, PlacementConfig, SessionConfig, StackConfig, VisibilityConfig,
};
pub use events::{EventQueue, SceneEvent, SceneObserver};
pub use focus::{FocusState, FocusTracker};
pub use gate::{GateRejection, PlacementGate};
pub use grab::{DropOutcome, GrabController, GrabOutcome, HeldState};
pub use object::{ObjectArena, ObjectHandle, ObjectTag, PhysicalState, PlacedObject};
pub use orchestrator::{PlaceRequest, PlacementContext, PlacementOrchestrator, PlacementOutcome};
pub use pose::Pose;
pub use render::{NullRenderer, SceneRenderer};
pub use session::{Session, SessionFault};
pub use stack::StackSolver;
pub use surface::{
    PlaneTracker, SurfaceChange, SurfaceHit, SurfaceHitResolver, SurfaceId, SurfaceTracker,
    TrackedPlane,
};
pub use viewer::Viewer;
pub use visibility::VisibilityCoordinator;
