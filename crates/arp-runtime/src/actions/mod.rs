//! Action handling module
//!
//! Actions are queued in AppState and processed each frame, before the
//! session tick.

mod capture;
mod grab;
mod placement;

use crate::state::{AppAction, SharedAppState};

pub use capture::handle_capture_action;
pub use grab::handle_grab_action;
pub use placement::handle_placement_action;

/// Context for action handlers
pub struct ActionContext<'a> {
    pub app_state: &'a SharedAppState,
}

impl<'a> ActionContext<'a> {
    pub fn new(app_state: &'a SharedAppState) -> Self {
        Self { app_state }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    match action {
        // Placement actions
        AppAction::Place(_)
        | AppAction::Reset
        | AppAction::RemoveObject(_)
        | AppAction::SurfacesChanged(_) => {
            handle_placement_action(action, ctx);
        }

        // Grab actions
        AppAction::Grab | AppAction::Drop => {
            handle_grab_action(action, ctx);
        }

        // Device actions
        AppAction::UpdateViewer(viewer) => {
            ctx.app_state.lock().session.set_viewer(viewer);
        }

        AppAction::SaveScreenshot { .. } => {
            handle_capture_action(action, ctx);
        }

        AppAction::Exit => {
            tracing::info!("Exit requested");
            ctx.app_state.lock().running = false;
        }
    }
}
