//! Physics constants and display preferences
//!
//! Persisted separately from the simulation snapshot.

use serde::{Deserialize, Serialize};

use crate::consts::{ANGLE_DIVISOR, BALANCE_TOLERANCE, MAX_ANGLE, SETTINGS_KEY};
use crate::persistence::KeyValueStore;

/// Tunable physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Tilt limit in degrees
    pub max_angle: f64,
    /// Torque difference per degree
    pub angle_divisor: f64,
    /// Torque difference still shown as "Balanced"
    pub balance_tolerance: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_angle: MAX_ANGLE,
            angle_divisor: ANGLE_DIVISOR,
            balance_tolerance: BALANCE_TOLERANCE,
        }
    }
}

impl PhysicsConfig {
    /// Set the tilt limit (negative values are mirrored, non-finite ignored)
    pub fn with_max_angle(mut self, degrees: f64) -> Self {
        if degrees.is_finite() {
            self.max_angle = degrees.abs();
        }
        self
    }

    /// Set the torque-per-degree divisor. Non-positive or non-finite values are ignored.
    pub fn with_angle_divisor(mut self, divisor: f64) -> Self {
        if divisor.is_finite() && divisor > 0.0 {
            self.angle_divisor = divisor;
        }
        self
    }

    pub fn with_balance_tolerance(mut self, tolerance: f64) -> Self {
        if tolerance.is_finite() {
            self.balance_tolerance = tolerance.max(0.0);
        }
        self
    }

    /// Repair values that would break evaluation (e.g. hand-edited storage)
    pub(crate) fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            max_angle: if self.max_angle.is_finite() {
                self.max_angle.abs()
            } else {
                defaults.max_angle
            },
            angle_divisor: if self.angle_divisor.is_finite() && self.angle_divisor > 0.0 {
                self.angle_divisor
            } else {
                defaults.angle_divisor
            },
            balance_tolerance: if self.balance_tolerance.is_finite() {
                self.balance_tolerance.max(0.0)
            } else {
                defaults.balance_tolerance
            },
        }
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConfig,

    // === Display ===
    /// Show the translucent ball following the pointer
    pub show_preview: bool,
    /// Show the drop log
    pub show_log: bool,
    /// Show per-side torque and balance status
    pub show_torque: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            show_preview: true,
            show_log: true,
            show_torque: true,
        }
    }
}

impl Settings {
    /// Load settings from the store, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.physics = settings.physics.sanitized();
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings store unavailable: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(SETTINGS_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings: {}", e),
            },
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }
}
