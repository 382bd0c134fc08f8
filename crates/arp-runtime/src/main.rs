//! Headless AR placement demo
//!
//! Loads `arp.ron` (or the path given as the first argument), simulates a
//! floor and a small table, and scripts a short session: stacking, rejected
//! taps, a grab and drop, a screenshot and a reset.

use std::path::PathBuf;

use arp_core::{
    ObjectHandle, PlaceRequest, PlaneTracker, Pose, SceneRenderer, Session, SurfaceId,
    SurfaceTracker, TrackedPlane, Viewer,
};
use arp_runtime::config::CONFIG_FILE_NAME;
use arp_runtime::feedback::create_cue_queue;
use arp_runtime::state::create_shared_state;
use arp_runtime::{
    AppAction, AppState, ConfigError, ConfigManager, PlacementCueObserver, Runtime, ScriptStep,
};
use glam::{Vec2, Vec3};

/// PNG signature; stands in for a captured frame
const FAKE_FRAME: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Renderer that only logs what it would draw
struct LoggingRenderer;

impl SceneRenderer for LoggingRenderer {
    fn set_highlighted(&mut self, handle: ObjectHandle, highlighted: bool) {
        tracing::debug!("highlight {} = {}", handle, highlighted);
    }

    fn set_surface_visible(&mut self, surface: SurfaceId, visible: bool) {
        tracing::debug!("surface {} visible = {}", surface, visible);
    }
}

fn viewer_at(template: &Viewer, eye: Vec3, target: Vec3) -> Viewer {
    template.with_pose(Pose::looking_at(eye, target))
}

fn main() -> Result<(), ConfigError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arp_runtime=debug,arp_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AR placement demo");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let manager = ConfigManager::load_or_default(&path)?;
    let config = manager.config().clone();

    let mut tracker = PlaneTracker::new();
    tracker.add_plane(TrackedPlane::new(Vec3::ZERO, Vec2::new(2.0, 2.0)));
    tracker.add_plane(
        TrackedPlane::new(Vec3::new(1.2, 0.7, -0.6), Vec2::new(0.4, 0.3)).with_yaw(0.4),
    );
    let tracker: Box<dyn SurfaceTracker> = Box::new(tracker);

    let mut session = Session::new(
        config.session.clone(),
        config.catalog.clone(),
        Some(tracker),
        Box::new(LoggingRenderer),
    );
    let cues = create_cue_queue();
    session.subscribe(Box::new(PlacementCueObserver::new(cues.clone())));

    let state = create_shared_state(AppState::new(session, &config));
    let runtime = Runtime::new(state, config.frame.frame_time());

    let display = config.display.viewer();
    let center = Vec2::new(config.display.width * 0.5, config.display.height * 0.5);
    let bottom = Vec2::new(config.display.width * 0.5, config.display.height - 10.0);

    let script = vec![
        // Standing back, looking at the middle of the floor
        ScriptStep::new(
            0.0,
            AppAction::UpdateViewer(viewer_at(&display, Vec3::new(0.0, 1.4, 1.2), Vec3::ZERO)),
        ),
        ScriptStep::new(0.5, AppAction::Place(PlaceRequest::at(center))),
        ScriptStep::new(1.2, AppAction::Place(PlaceRequest::at(center))),
        ScriptStep::new(1.3, AppAction::Place(PlaceRequest::at(center))),
        ScriptStep::new(2.0, AppAction::Place(PlaceRequest::at(bottom))),
        ScriptStep::new(2.5, AppAction::Place(PlaceRequest::over_ui(center))),
        // Lean in over the stack
        ScriptStep::new(
            3.0,
            AppAction::UpdateViewer(viewer_at(
                &display,
                Vec3::new(0.0, 0.8, 0.5),
                Vec3::new(0.0, 0.2, 0.0),
            )),
        ),
        ScriptStep::new(3.5, AppAction::Grab),
        ScriptStep::new(
            4.0,
            AppAction::UpdateViewer(viewer_at(
                &display,
                Vec3::new(0.6, 0.9, 0.4),
                Vec3::new(0.6, 0.0, -0.6),
            )),
        ),
        ScriptStep::new(4.5, AppAction::Drop),
        ScriptStep::new(
            5.0,
            AppAction::SaveScreenshot {
                png: FAKE_FRAME.to_vec(),
            },
        ),
        ScriptStep::new(6.0, AppAction::Reset),
        ScriptStep::new(6.1, AppAction::Place(PlaceRequest::at(center))),
        ScriptStep::new(
            6.4,
            AppAction::UpdateViewer(viewer_at(&display, Vec3::new(0.0, 1.4, 1.2), Vec3::ZERO)),
        ),
        ScriptStep::new(6.5, AppAction::Place(PlaceRequest::at(center))),
        ScriptStep::new(17.0, AppAction::Exit),
    ];

    let end = runtime.run_script(script, 30.0);

    let state = runtime.state().lock();
    tracing::info!(
        "Demo finished at {:.2}s: {} placed in total, {} on the surface now",
        end,
        state.session.placed_count(),
        state.session.objects().len()
    );
    for object in state.session.objects().iter() {
        tracing::info!("  {} at {:?}", object.name, object.pose.position);
    }
    for cue in cues.lock().drain(..) {
        tracing::debug!("Audio cue for {} at {:.2}s", cue.variant, cue.at);
    }

    Ok(())
}
