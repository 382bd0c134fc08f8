//! Grab and drop action handlers

use arp_core::{DropOutcome, GrabOutcome};

use crate::state::AppAction;

use super::ActionContext;

/// Handle grab button actions
pub fn handle_grab_action(action: AppAction, ctx: &ActionContext) {
    let mut state = ctx.app_state.lock();
    let now = state.clock;

    match action {
        AppAction::Grab => match state.session.grab(now) {
            GrabOutcome::Grabbed(_) | GrabOutcome::NothingFocused => {}
            GrabOutcome::AlreadyHolding(handle) => {
                tracing::debug!("Grab ignored: already holding {}", handle);
            }
        },
        AppAction::Drop => {
            if state.session.drop(now) == DropOutcome::NotHolding {
                tracing::debug!("Drop ignored: nothing held");
            }
        }
        _ => {}
    }

    state.sync_panel();
}
