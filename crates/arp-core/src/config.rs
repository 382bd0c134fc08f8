//! Session tuning
//!
//! Every section can be omitted from a configuration file; missing values fall
//! back to the defaults in [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEAD_ZONE_FRACTION, DEFAULT_VARIANT_PRIORITY, DETECTION_RADIUS, DROP_GUARD,
    PLACEMENT_COOLDOWN, RESET_GUARD, STACK_CLEARANCE, STACK_SEARCH_RADIUS, SURFACE_HIDE_DELAY,
};

/// Placement gate and catalog ordering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum seconds between two placements
    pub cooldown: f64,
    /// Bottom band of the screen, as a fraction of its height, that never
    /// accepts placements or focus
    pub dead_zone_fraction: f32,
    /// Seconds placement stays disabled after a reset
    pub reset_guard: f64,
    /// Variant names in the order they should be cycled
    pub priority: Vec<String>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            cooldown: PLACEMENT_COOLDOWN,
            dead_zone_fraction: DEAD_ZONE_FRACTION,
            reset_guard: RESET_GUARD,
            priority: DEFAULT_VARIANT_PRIORITY
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Stacking heuristic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackConfig {
    pub search_radius: f32,
    /// Height added above the tallest object found
    pub clearance: f32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            search_radius: STACK_SEARCH_RADIUS,
            clearance: STACK_CLEARANCE,
        }
    }
}

/// Focus selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FocusConfig {
    /// Maximum viewer distance for a focus candidate
    pub detection_radius: f32,
    /// Full opening angle of the forward view cone. `None` disables the cone
    /// check.
    pub view_cone_degrees: Option<f32>,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            detection_radius: DETECTION_RADIUS,
            view_cone_degrees: None,
        }
    }
}

/// Grab and drop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrabConfig {
    /// Seconds placement stays disabled after a drop
    pub drop_guard: f64,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            drop_guard: DROP_GUARD,
        }
    }
}

/// Surface indicator visibility
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Seconds a surface indicator stays visible after it was shown
    pub hide_delay: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            hide_delay: SURFACE_HIDE_DELAY,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub stack: StackConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub grab: GrabConfig,
    #[serde(default)]
    pub visibility: VisibilityConfig,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict focus mode: candidates must also lie inside a forward cone
    pub fn with_view_cone(mut self, degrees: f32) -> Self {
        self.focus.view_cone_degrees = Some(degrees);
        self
    }
}
