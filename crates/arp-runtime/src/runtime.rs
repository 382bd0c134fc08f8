//! Frame loop
//!
//! Each frame: drain queued actions in order, then tick the session, then
//! refresh the control panel and expire notices. All of it happens under the
//! shared state lock, one handler at a time.

use crate::actions::{ActionContext, dispatch_action};
use crate::state::{AppAction, SharedAppState};

/// An action scheduled at a session time
#[derive(Debug, Clone)]
pub struct ScriptStep {
    pub at: f64,
    pub action: AppAction,
}

impl ScriptStep {
    pub fn new(at: f64, action: AppAction) -> Self {
        Self { at, action }
    }
}

pub struct Runtime {
    state: SharedAppState,
    frame_time: f64,
}

impl Runtime {
    pub fn new(state: SharedAppState, frame_time: f64) -> Self {
        Self {
            state,
            frame_time: frame_time.max(1e-4),
        }
    }

    pub fn state(&self) -> &SharedAppState {
        &self.state
    }

    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    pub fn queue_action(&self, action: AppAction) {
        self.state.lock().queue_action(action);
    }

    /// Process one frame at `now`. Returns false once the app should stop.
    pub fn frame(&self, now: f64) -> bool {
        let actions = {
            let mut state = self.state.lock();
            state.clock = now;
            state.take_pending_actions()
        };

        let ctx = ActionContext::new(&self.state);
        for action in actions {
            dispatch_action(action, &ctx);
            if !self.state.lock().running {
                break;
            }
        }

        let mut state = self.state.lock();
        if !state.running {
            return false;
        }
        state.session.tick(now);
        state.sync_panel();
        state.notices.expire(now);
        true
    }

    /// Run frames from time zero, feeding `script` in at its timestamps,
    /// until an exit or `max_time`. Returns the time of the last frame.
    pub fn run_script(&self, mut script: Vec<ScriptStep>, max_time: f64) -> f64 {
        script.sort_by(|a, b| a.at.total_cmp(&b.at));
        let mut steps = script.into_iter().peekable();
        let mut frame = 0u64;

        loop {
            let now = frame as f64 * self.frame_time;
            while let Some(step) = steps.next_if(|s| s.at <= now) {
                self.queue_action(step.action);
            }
            if !self.frame(now) || now >= max_time {
                return now;
            }
            frame += 1;
        }
    }
}
