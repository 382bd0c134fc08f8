//! AR placement runtime
//!
//! Drives an [`arp_core::Session`] the way an interactive app does: input is
//! queued as [`AppAction`]s, drained once per frame under a shared lock, and
//! followed by the session tick.

pub mod actions;
pub mod config;
pub mod feedback;
pub mod runtime;
pub mod screenshot;
pub mod state;

// Re-exports for convenience
pub use config::{AppConfig, ConfigError, ConfigManager};
pub use feedback::{AudioCue, CueQueue, PlacementCueObserver};
pub use runtime::{Runtime, ScriptStep};
pub use screenshot::CaptureError;
pub use state::{AppAction, AppState, SharedAppState};
