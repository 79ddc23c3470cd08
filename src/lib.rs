//! Paper Flight - flight physics and session core for a paper-airplane arcade game
//!
//! Core modules:
//! - `sim`: Simulation (wind, lift/drag, physics engine, collisions, session state)
//! - `hangar`: Airplane/fold/design lookup tables and unlock requirements
//! - `config`: Data-driven flight tuning
//! - `services`: Collaborator interfaces injected into the session driver

pub mod config;
pub mod hangar;
pub mod services;
pub mod sim;

pub use config::FlightConfig;
pub use hangar::{AirplaneType, DesignType, FoldType, PlaneSpec};
pub use services::Services;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Nominal simulation timestep (60 Hz, matches the host frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Upper bound for wind strength (units of force)
    pub const MAX_WIND: f32 = 1000.0;
    /// Upper bound for the per-call direction drift (degrees)
    pub const MAX_DRIFT_DEGREES: f32 = 45.0;

    /// Upper bound for configured body speed (units/s)
    pub const MAX_SPEED: f32 = 10_000.0;
    /// Upper bound for the tilt-to-force scale
    pub const MAX_STEERING: f32 = 1000.0;

    /// Sensitivity bounds for tilt input
    pub const MIN_SENSITIVITY: f32 = 0.1;
    pub const MAX_SENSITIVITY: f32 = 2.0;

    /// Tilt axis values are clamped to ±this after non-finite filtering
    pub const MAX_TILT: f32 = 1.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed difference `to - from` in degrees, in (-180, 180]
#[inline]
pub fn shortest_degrees(from: f32, to: f32) -> f32 {
    let delta = normalize_degrees(to) - normalize_degrees(from);
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

/// Convert polar (r, degrees) to cartesian (x, y)
#[inline]
pub fn polar_degrees_to_cartesian(r: f32, degrees: f32) -> Vec2 {
    let theta = normalize_degrees(degrees).to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Replace a non-finite value with zero
#[inline]
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((normalize_degrees(720.0)).abs() < 1e-4);
        assert_eq!(normalize_degrees(f32::NAN), 0.0);
        assert_eq!(normalize_degrees(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_shortest_degrees_wraps() {
        assert!((shortest_degrees(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((shortest_degrees(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert!((shortest_degrees(0.0, 180.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_polar_degrees_to_cartesian() {
        let v = polar_degrees_to_cartesian(2.0, 90.0);
        assert!(v.x.abs() < 1e-4);
        assert!((v.y - 2.0).abs() < 1e-4);

        let wrapped = polar_degrees_to_cartesian(2.0, 450.0);
        assert!((wrapped - v).length() < 1e-4);
    }
}
