//! Default tuning values for arp-core

/// Minimum seconds between two successful placements
pub const PLACEMENT_COOLDOWN: f64 = 0.5;

/// Fraction of the screen height reserved at the bottom for UI controls
pub const DEAD_ZONE_FRACTION: f32 = 1.0 / 6.0;

/// Radius of the sphere searched for objects to stack on (meters)
pub const STACK_SEARCH_RADIUS: f32 = 2.0;

/// Vertical offset added above the tallest object in the search sphere (meters)
pub const STACK_CLEARANCE: f32 = 0.1;

/// Maximum viewer distance at which an object can take focus (meters)
pub const DETECTION_RADIUS: f32 = 1.0;

/// Seconds placement stays disabled after a drop
pub const DROP_GUARD: f64 = 0.2;

/// Seconds placement stays disabled after a scene reset
pub const RESET_GUARD: f64 = 0.2;

/// Seconds before a surface indicator is hidden after it was shown
pub const SURFACE_HIDE_DELAY: f64 = 10.0;

/// Uniform scale applied to newly placed objects
pub const DEFAULT_OBJECT_SCALE: f32 = 0.2;

/// Default variant ordering used when sorting the prefab catalog
pub const DEFAULT_VARIANT_PRIORITY: [&str; 3] = ["Cube", "Sphere", "Cylinder"];
