//! Placement action handlers

use arp_core::PlacementOutcome;

use crate::state::{AppAction, NoticeLevel};

use super::ActionContext;

/// Handle placement-related actions
pub fn handle_placement_action(action: AppAction, ctx: &ActionContext) {
    let mut state = ctx.app_state.lock();
    let now = state.clock;

    match action {
        AppAction::Place(request) => match state.session.place(request, now) {
            PlacementOutcome::Placed { variant, .. } => {
                tracing::debug!("Place request at {:?} produced {}", request.point, variant);
            }
            PlacementOutcome::NoSurface => {
                tracing::debug!("Place request at {:?} hit no surface", request.point);
            }
            PlacementOutcome::RejectedByGate(_) => {}
        },
        AppAction::Reset => {
            let removed = state.session.reset(now);
            state.sync_panel();
            state
                .notices
                .push(NoticeLevel::Info, format!("Removed {} objects", removed), now);
        }
        AppAction::RemoveObject(handle) => {
            if state.session.remove_object(handle).is_none() {
                tracing::warn!("Remove requested for unknown object {}", handle);
            }
            state.sync_panel();
        }
        AppAction::SurfacesChanged(change) => {
            state.session.surfaces_changed(&change, now);
        }
        _ => {}
    }
}
