//! Audio feedback
//!
//! The audio device is external. [`PlacementCueObserver`] turns placements
//! into one-shot cues that the audio side drains from a [`CueQueue`].

use std::sync::Arc;

use arp_core::{SceneEvent, SceneObserver};
use parking_lot::Mutex;

/// A sound to play once
#[derive(Debug, Clone, PartialEq)]
pub struct AudioCue {
    /// Variant that triggered the cue
    pub variant: String,
    /// Session time the cue was raised
    pub at: f64,
}

/// Cues waiting for the audio collaborator
pub type CueQueue = Arc<Mutex<Vec<AudioCue>>>;

pub fn create_cue_queue() -> CueQueue {
    Arc::new(Mutex::new(Vec::new()))
}

/// Raises one cue per placement
pub struct PlacementCueObserver {
    queue: CueQueue,
}

impl PlacementCueObserver {
    pub fn new(queue: CueQueue) -> Self {
        Self { queue }
    }
}

impl SceneObserver for PlacementCueObserver {
    fn on_event(&mut self, event: &SceneEvent, now: f64) {
        if let SceneEvent::Placed { variant, .. } = event {
            self.queue.lock().push(AudioCue {
                variant: variant.clone(),
                at: now,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arp_core::{ObjectHandle, Pose};

    #[test]
    fn test_one_cue_per_placement() {
        let queue = create_cue_queue();
        let mut observer = PlacementCueObserver::new(queue.clone());

        observer.on_event(
            &SceneEvent::Placed {
                handle: ObjectHandle::new(),
                variant: "Cube".into(),
                pose: Pose::IDENTITY,
            },
            1.5,
        );
        observer.on_event(&SceneEvent::ObjectGrabbed(ObjectHandle::new()), 2.0);
        observer.on_event(&SceneEvent::SceneReset { removed: 1 }, 3.0);

        let cues = std::mem::take(&mut *queue.lock());
        assert_eq!(
            cues,
            vec![AudioCue {
                variant: "Cube".into(),
                at: 1.5
            }]
        );
    }
}
