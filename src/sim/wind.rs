//! Ambient wind
//!
//! Holds a single wind vector that can be set instantly, drift randomly each
//! tick, or ease toward a target over a duration. Transitions are advanced
//! cooperatively by the tick loop; nothing here blocks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::FlightConfig;
use crate::consts::{MAX_DRIFT_DEGREES, MAX_WIND};
use crate::{finite_or_zero, normalize_degrees, polar_degrees_to_cartesian, shortest_degrees};

/// Wind direction (degrees, normalized to [0, 360)) and strength
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindVector {
    pub direction_degrees: f32,
    pub strength: f32,
}

impl WindVector {
    /// Cartesian vector with magnitude `strength`
    pub fn vector(&self) -> Vec2 {
        polar_degrees_to_cartesian(self.strength, self.direction_degrees)
    }

    /// Interpolate along the shortest arc
    fn lerp(&self, target: &WindVector, t: f32) -> WindVector {
        let delta = shortest_degrees(self.direction_degrees, target.direction_degrees);
        WindVector {
            direction_degrees: normalize_degrees(self.direction_degrees + delta * t),
            strength: self.strength + (target.strength - self.strength) * t,
        }
    }
}

/// An in-flight interpolation toward a target vector
#[derive(Debug, Clone, Copy, PartialEq)]
struct WindTransition {
    from: WindVector,
    to: WindVector,
    duration: f32,
    elapsed: f32,
}

/// Wind-related tuning copied out of [`FlightConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
struct WindTuning {
    max_wind: f32,
    drift_enabled: bool,
    drift_direction_degrees: f32,
    drift_strength: f32,
    turbulence_scale: f32,
    turbulence_smoothing: f32,
}

impl From<&FlightConfig> for WindTuning {
    fn from(config: &FlightConfig) -> Self {
        Self {
            max_wind: finite_or_zero(config.max_wind).clamp(0.0, MAX_WIND),
            drift_enabled: config.drift_enabled,
            drift_direction_degrees: finite_or_zero(config.drift_direction_degrees)
                .abs()
                .min(MAX_DRIFT_DEGREES),
            drift_strength: finite_or_zero(config.drift_strength).abs().min(MAX_WIND),
            turbulence_scale: finite_or_zero(config.turbulence_scale).clamp(0.0, 1.0),
            turbulence_smoothing: finite_or_zero(config.turbulence_smoothing).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindModel {
    wind: WindVector,
    transition: Option<WindTransition>,
    /// Low-pass filtered noise in [-1, 1]²
    turbulence: Vec2,
    tuning: WindTuning,
    rng: Pcg32,
}

impl WindModel {
    /// Calm wind with a seeded random source
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(rng: Pcg32) -> Self {
        Self {
            wind: WindVector::default(),
            transition: None,
            turbulence: Vec2::ZERO,
            tuning: WindTuning::from(&FlightConfig::default()),
            rng,
        }
    }

    pub fn with_config(mut self, config: &FlightConfig) -> Self {
        self.tuning = WindTuning::from(config);
        self.wind.strength = self.wind.strength.min(self.tuning.max_wind);
        self
    }

    pub fn wind(&self) -> WindVector {
        self.wind
    }

    /// Current wind as a cartesian vector
    pub fn vector(&self) -> Vec2 {
        self.wind.vector()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    fn clamp_strength(&self, strength: f32) -> f32 {
        finite_or_zero(strength).clamp(0.0, self.tuning.max_wind)
    }

    /// Overwrite the wind vector, cancelling any pending transition
    pub fn set_vector(&mut self, direction_degrees: f32, strength: f32) {
        self.transition = None;
        self.wind = WindVector {
            direction_degrees: normalize_degrees(direction_degrees),
            strength: self.clamp_strength(strength),
        };
    }

    /// Nudge direction and strength by small random deltas (calm wind stays calm)
    pub fn drift_randomly(&mut self) {
        if self.wind.strength <= 0.0 {
            return;
        }
        let dd = self.tuning.drift_direction_degrees;
        let ds = self.tuning.drift_strength;
        let direction_delta = self.rng.random_range(-dd..=dd);
        let strength_delta = self.rng.random_range(-ds..=ds);

        self.wind = WindVector {
            direction_degrees: normalize_degrees(self.wind.direction_degrees + direction_delta),
            strength: self.clamp_strength(self.wind.strength + strength_delta),
        };
    }

    /// Ease toward a target over `duration` seconds (immediate if `duration <= 0`)
    pub fn transition_to(&mut self, direction_degrees: f32, strength: f32, duration: f32) {
        if !duration.is_finite() || duration <= 0.0 {
            self.set_vector(direction_degrees, strength);
            return;
        }
        let to = WindVector {
            direction_degrees: normalize_degrees(direction_degrees),
            strength: self.clamp_strength(strength),
        };
        log::debug!(
            "Wind transition to {:.1}° @ {:.1} over {:.2}s",
            to.direction_degrees,
            to.strength,
            duration
        );
        self.transition = Some(WindTransition {
            from: self.wind,
            to,
            duration,
            elapsed: 0.0,
        });
    }

    /// Advance the pending transition, or drift when none is pending
    pub fn advance(&mut self, dt: f32) {
        let dt = finite_or_zero(dt).max(0.0);
        match self.transition.as_mut() {
            Some(transition) => {
                transition.elapsed += dt;
                let t = (transition.elapsed / transition.duration).min(1.0);
                self.wind = transition.from.lerp(&transition.to, t);
                if t >= 1.0 {
                    self.wind = transition.to;
                    self.transition = None;
                    log::debug!("Wind transition complete");
                }
            }
            None => {
                if self.tuning.drift_enabled {
                    self.drift_randomly();
                }
            }
        }
    }

    /// Next turbulence offset, scaled by current strength
    pub fn sample_turbulence(&mut self) -> Vec2 {
        if self.wind.strength <= 0.0 {
            return Vec2::ZERO;
        }
        let noise = Vec2::new(
            self.rng.random_range(-1.0..=1.0),
            self.rng.random_range(-1.0..=1.0),
        );
        self.turbulence = self
            .turbulence
            .lerp(noise, self.tuning.turbulence_smoothing);
        self.turbulence * self.wind.strength * self.tuning.turbulence_scale
    }
}
