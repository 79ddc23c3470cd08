//! Flight tuning
//!
//! Every physics and scoring constant is data-driven. Loaded from JSON by the
//! host; missing fields fall back to defaults and malformed input falls back to
//! the whole default table.

use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_DRIFT_DEGREES, MAX_SENSITIVITY, MAX_SPEED, MAX_STEERING, MAX_WIND, MIN_SENSITIVITY,
};

/// Tunable flight constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    // === Steering ===
    /// Forward speed given to the plane when a session starts
    pub launch_speed: f32,
    /// Tilt-to-force scale
    pub steering_constant: f32,
    /// Sensitivity applied when the engine is created
    pub default_sensitivity: f32,
    /// Visual rotation (radians) at full tilt
    pub visual_tilt_factor: f32,
    /// Tilt-to-torque scale (multiplied by the plane's turn rate)
    pub torque_constant: f32,

    // === Aerodynamics ===
    /// Lift coefficient `k` in `k * |v| * lift_multiplier`
    pub lift_coefficient: f32,
    /// Quadratic drag coefficient
    pub drag_coefficient: f32,
    /// Upper bound on drag magnitude
    pub max_drag: f32,
    /// Upper bound on body speed after integration
    pub max_speed: f32,

    // === Wind ===
    /// Maximum wind strength
    pub max_wind: f32,
    /// Fraction of the wind vector added to velocity each tick
    pub wind_influence: f32,
    /// Whether ambient wind drifts when no transition is running
    pub drift_enabled: bool,
    /// Maximum per-call direction drift (degrees)
    pub drift_direction_degrees: f32,
    /// Maximum per-call strength drift (units)
    pub drift_strength: f32,
    /// Turbulence amplitude relative to wind strength
    pub turbulence_scale: f32,
    /// Low-pass factor for turbulence noise (0 = frozen, 1 = raw noise)
    pub turbulence_smoothing: f32,

    // === Scoring ===
    /// Score lost on obstacle contact
    pub obstacle_penalty: u32,
    /// Coins granted per collectible
    pub collectible_coins: u32,
    /// Score granted per collectible
    pub collectible_score: u32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            launch_speed: 150.0,
            steering_constant: 12.0,
            default_sensitivity: 1.0,
            visual_tilt_factor: 0.6,
            torque_constant: 0.05,

            lift_coefficient: 0.002,
            drag_coefficient: 0.00005,
            max_drag: 40.0,
            max_speed: 600.0,

            max_wind: MAX_WIND,
            wind_influence: 0.01,
            drift_enabled: true,
            drift_direction_degrees: 2.0,
            drift_strength: 1.5,
            turbulence_scale: 0.004,
            turbulence_smoothing: 0.15,

            obstacle_penalty: 50,
            collectible_coins: 1,
            collectible_score: 10,
        }
    }
}

impl FlightConfig {
    /// Parse a config from JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<FlightConfig>(json) {
            Ok(config) => {
                log::info!("Loaded flight config");
                config.sanitized()
            }
            Err(err) => {
                log::warn!("Malformed flight config ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> String {
        // A struct of plain numbers and bools always serializes
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Clamp every field into a usable range
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        // Non-finite or negative takes the default; anything else is capped at `max`
        let bounded = |value: f32, fallback: f32, max: f32| {
            if value.is_finite() && value >= 0.0 { value.min(max) } else { fallback }
        };
        let max_speed = bounded(self.max_speed, defaults.max_speed, MAX_SPEED);

        Self {
            launch_speed: bounded(
                self.launch_speed,
                defaults.launch_speed.min(max_speed),
                max_speed,
            ),
            steering_constant: bounded(
                self.steering_constant,
                defaults.steering_constant,
                MAX_STEERING,
            ),
            default_sensitivity: if self.default_sensitivity.is_finite() {
                self.default_sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY)
            } else {
                defaults.default_sensitivity
            },
            visual_tilt_factor: bounded(
                self.visual_tilt_factor,
                defaults.visual_tilt_factor,
                std::f32::consts::PI,
            ),
            torque_constant: bounded(self.torque_constant, defaults.torque_constant, 10.0),
            lift_coefficient: bounded(self.lift_coefficient, defaults.lift_coefficient, 1.0),
            drag_coefficient: bounded(self.drag_coefficient, defaults.drag_coefficient, 1.0),
            max_drag: bounded(self.max_drag, defaults.max_drag, MAX_SPEED),
            max_speed,
            max_wind: bounded(self.max_wind, defaults.max_wind, MAX_WIND),
            wind_influence: bounded(self.wind_influence, defaults.wind_influence, 1.0),
            drift_enabled: self.drift_enabled,
            drift_direction_degrees: bounded(
                self.drift_direction_degrees,
                defaults.drift_direction_degrees,
                MAX_DRIFT_DEGREES,
            ),
            drift_strength: bounded(self.drift_strength, defaults.drift_strength, MAX_WIND),
            turbulence_scale: bounded(self.turbulence_scale, defaults.turbulence_scale, 1.0),
            turbulence_smoothing: bounded(
                self.turbulence_smoothing,
                defaults.turbulence_smoothing,
                1.0,
            ),
            obstacle_penalty: self.obstacle_penalty,
            collectible_coins: self.collectible_coins,
            collectible_score: self.collectible_score,
        }
    }
}
