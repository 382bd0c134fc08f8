//! Screenshot action handler

use chrono::Local;

use crate::screenshot::save_screenshot;
use crate::state::{AppAction, NoticeLevel};

use super::ActionContext;

/// Handle screenshot actions. Failures become a notice; the session is never
/// touched.
pub fn handle_capture_action(action: AppAction, ctx: &ActionContext) {
    let AppAction::SaveScreenshot { png } = action else {
        return;
    };

    let (directory, now) = {
        let state = ctx.app_state.lock();
        (state.capture_dir.clone(), state.clock)
    };

    let result = save_screenshot(&directory, &png, Local::now());

    let mut state = ctx.app_state.lock();
    match result {
        Ok(path) => {
            tracing::info!("Screenshot saved to {}", path.display());
            state
                .notices
                .push(NoticeLevel::Info, format!("Saved {}", path.display()), now);
        }
        Err(e) => {
            tracing::warn!("Failed to save screenshot: {}", e);
            state
                .notices
                .push(NoticeLevel::Warning, format!("Screenshot failed: {}", e), now);
        }
    }
}
