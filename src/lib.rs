//! Seesaw - drop weights on a plank and watch it tilt
//!
//! Core modules:
//! - `sim`: Simulation state, torque evaluation and drop log (pure, no platform deps)
//! - `session`: Command handlers tying state, physics, rendering and persistence together
//! - `persistence`: Key-value store abstraction and snapshot save/load
//! - `platform`: Browser/native storage backends
//! - `view`: Presentation helpers for renderers
//! - `settings`: Tunable physics constants and display preferences

pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod view;

pub use error::{PersistenceError, SnapshotError, StoreError};
pub use session::{DropOutcome, Renderer, Session};
pub use settings::{PhysicsConfig, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Tilt angle limit in degrees (either direction)
    pub const MAX_ANGLE: f64 = 30.0;
    /// Torque difference per degree of tilt
    pub const ANGLE_DIVISOR: f64 = 10.0;
    /// Torque difference below which the plank counts as balanced.
    /// Independent of `ANGLE_DIVISOR` even though both are 10.
    pub const BALANCE_TOLERANCE: f64 = 10.0;
    /// Distance from pivot below which a drop is logged as "center"
    pub const CENTER_THRESHOLD: f64 = 5.0;

    /// X coordinate of the pivot, relative to the plank's left edge (px)
    pub const PLANK_CENTER: f64 = 200.0;

    /// Object weight range (kg, inclusive)
    pub const MIN_WEIGHT: u8 = 1;
    pub const MAX_WEIGHT: u8 = 10;
    /// Objects heavier than this are drawn/logged as heavy
    pub const HEAVY_WEIGHT: u8 = 5;

    /// Storage key for the simulation snapshot
    pub const STORAGE_KEY: &str = "seesaw_simulation_v1";
    /// Storage key for settings
    pub const SETTINGS_KEY: &str = "seesaw_settings";
}

/// Convert a click position on the plank into a signed distance from the pivot
#[inline]
pub fn distance_from_click(click_x: f64) -> f64 {
    click_x - consts::PLANK_CENTER
}

/// Format with `digits` decimals, rounding halves away from zero like the
/// browser's `Number.prototype.toFixed`
pub fn to_fixed(value: f64, digits: u8) -> String {
    // -0 prints as "0", but a negative value rounding to zero keeps its sign
    let value = if value == 0.0 { 0.0 } else { value };
    let scale = 10f64.powi(i32::from(digits));
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", usize::from(digits), rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_from_click() {
        assert_eq!(distance_from_click(200.0), 0.0);
        assert_eq!(distance_from_click(160.0), -40.0);
        assert_eq!(distance_from_click(260.0), 60.0);
    }

    #[test]
    fn test_to_fixed_rounds_halves_up() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(39.6, 0), "40");
        assert_eq!(to_fixed(-2.0, 1), "-2.0");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(format!("{:.0}", 2.5), "2");
    }
}
