//! Application state module

mod notice;
mod panel;

pub use notice::{Notice, NoticeLevel, Notices};
pub use panel::ControlPanel;

use std::path::PathBuf;
use std::sync::Arc;

use arp_core::{ObjectHandle, PlaceRequest, Session, SurfaceChange, Viewer};
use parking_lot::Mutex;

use crate::config::AppConfig;

/// Actions that can be performed on the app state
#[derive(Debug, Clone)]
pub enum AppAction {
    // Placement actions
    /// Tap on the screen
    Place(PlaceRequest),
    /// Destroy every placed object
    Reset,
    /// Destroy one object
    RemoveObject(ObjectHandle),
    /// The surface tracker reported new or lost surfaces
    SurfacesChanged(SurfaceChange),

    // Grab actions
    /// Grab button pressed
    Grab,
    /// Drop button pressed
    Drop,

    // Device actions
    /// New camera pose from the AR session
    UpdateViewer(Viewer),
    /// Save PNG bytes produced by the capture collaborator
    SaveScreenshot { png: Vec<u8> },
    /// Leave the application
    Exit,
}

/// Application state
pub struct AppState {
    /// Placement session
    pub session: Session,
    /// Grab/drop buttons
    pub panel: ControlPanel,
    /// Transient messages
    pub notices: Notices,
    /// Where screenshots are written
    pub capture_dir: PathBuf,
    /// Cleared by [`AppAction::Exit`]
    pub running: bool,
    /// Time of the frame being processed
    pub clock: f64,
    /// Pending actions
    pending_actions: Vec<AppAction>,
}

impl AppState {
    /// Create a new app state
    pub fn new(session: Session, config: &AppConfig) -> Self {
        let mut panel = ControlPanel::default();
        panel.sync(session.is_holding());
        Self {
            session,
            panel,
            notices: Notices::new(config.notices.lifetime),
            capture_dir: config.capture.directory.clone(),
            running: true,
            clock: 0.0,
            pending_actions: Vec::new(),
        }
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Bring the control panel in line with the session
    pub fn sync_panel(&mut self) {
        self.panel.sync(self.session.is_holding());
    }
}

pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared app state
pub fn create_shared_state(state: AppState) -> SharedAppState {
    Arc::new(Mutex::new(state))
}
