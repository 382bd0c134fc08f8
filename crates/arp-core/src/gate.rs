//! Placement admission
//!
//! Checks run in a fixed order and stop at the first rejection:
//! UI ownership, global switch / held object, cooldown, dead zone.

use glam::Vec2;

use crate::config::PlacementConfig;
use crate::viewer::Viewer;

/// Why a placement attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// The UI owns the pointer
    PointerOverUi,
    /// Placement is switched off (after a drop or reset, or by the caller)
    PlacementDisabled,
    /// An object is currently held
    HoldingObject,
    /// The session has a configuration fault
    Unavailable,
    CoolingDown,
    /// The point lies in the reserved band at the bottom of the screen
    InDeadZone,
}

#[derive(Debug, Clone)]
pub struct PlacementGate {
    cooldown: f64,
    dead_zone_fraction: f32,
    last_placement: f64,
    enabled: bool,
    faulted: bool,
    resume_at: Option<f64>,
}

impl PlacementGate {
    pub fn new(config: &PlacementConfig) -> Self {
        Self {
            cooldown: config.cooldown.max(0.0),
            dead_zone_fraction: config.dead_zone_fraction.clamp(0.0, 1.0),
            last_placement: f64::NEG_INFINITY,
            enabled: true,
            faulted: false,
            resume_at: None,
        }
    }

    /// Decide whether a placement at `point` may proceed
    pub fn evaluate(
        &self,
        point: Vec2,
        over_ui: bool,
        holding: bool,
        viewer: &Viewer,
        now: f64,
    ) -> Result<(), GateRejection> {
        let result = self.check(point, over_ui, holding, viewer, now);
        if let Err(reason) = result {
            tracing::debug!("Placement rejected: {:?}", reason);
        }
        result
    }

    fn check(
        &self,
        point: Vec2,
        over_ui: bool,
        holding: bool,
        viewer: &Viewer,
        now: f64,
    ) -> Result<(), GateRejection> {
        if over_ui {
            return Err(GateRejection::PointerOverUi);
        }
        if self.faulted {
            return Err(GateRejection::Unavailable);
        }
        if !self.enabled {
            return Err(GateRejection::PlacementDisabled);
        }
        if holding {
            return Err(GateRejection::HoldingObject);
        }
        // NaN compares false, so non-finite clocks count as cooling down
        if !now.is_finite() || now - self.last_placement < self.cooldown {
            return Err(GateRejection::CoolingDown);
        }
        if viewer.in_dead_zone(point, self.dead_zone_fraction) {
            return Err(GateRejection::InDeadZone);
        }
        Ok(())
    }

    /// Start the cooldown at `now`. Non-finite times are ignored.
    pub fn record_placement(&mut self, now: f64) {
        if now.is_finite() {
            self.last_placement = now;
        } else {
            tracing::warn!("Ignoring non-finite placement time {}", now);
        }
    }

    pub fn last_placement(&self) -> f64 {
        self.last_placement
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.faulted
    }

    /// Turn placement off, cancelling any pending resume
    pub fn disable(&mut self) {
        self.enabled = false;
        self.resume_at = None;
    }

    /// Turn placement on immediately
    pub fn enable(&mut self) {
        self.enabled = true;
        self.resume_at = None;
    }

    /// Keep placement off until `now + delay`
    pub fn enable_after(&mut self, now: f64, delay: f64) {
        if delay <= 0.0 {
            self.enable();
            return;
        }
        self.enabled = false;
        self.resume_at = Some(now + delay);
    }

    /// Apply a pending resume whose deadline has passed
    pub fn poll(&mut self, now: f64) {
        if self.resume_at.is_some_and(|at| now >= at) {
            self.enable();
            tracing::debug!("Placement re-enabled at {:.3}s", now);
        }
    }

    /// Disable placement for the rest of the session
    pub fn mark_faulted(&mut self) {
        self.faulted = true;
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    pub fn dead_zone_fraction(&self) -> f32 {
        self.dead_zone_fraction
    }
}
