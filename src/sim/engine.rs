//! Per-tick force application
//!
//! Combines tilt steering, lift, drag, wind and turbulence into velocity
//! changes on a [`FlyingBody`]. Every entry point is total: malformed input is
//! neutralized and a body without physical state is left alone.

use glam::Vec2;

use super::aero::AeroModel;
use super::body::FlyingBody;
use super::wind::WindModel;
use crate::config::FlightConfig;
use crate::consts::{MAX_SENSITIVITY, MAX_TILT, MIN_SENSITIVITY};
use crate::finite_or_zero;

/// Direction lift acts in (world up)
pub const LIFT_DIRECTION: Vec2 = Vec2::Y;

/// What had to be neutralized while applying forces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForceReport {
    /// A tilt axis was NaN or infinite
    pub tilt_sanitized: bool,
    /// The resulting velocity was non-finite and was reset
    pub velocity_reset: bool,
}

impl ForceReport {
    pub fn is_clean(&self) -> bool {
        !self.tilt_sanitized && !self.velocity_reset
    }

    fn merge(self, other: ForceReport) -> ForceReport {
        ForceReport {
            tilt_sanitized: self.tilt_sanitized || other.tilt_sanitized,
            velocity_reset: self.velocity_reset || other.velocity_reset,
        }
    }
}

/// Replace non-finite axes with zero and clamp to the nominal range
pub fn sanitize_tilt(tilt_x: f32, tilt_y: f32) -> (Vec2, bool) {
    let sanitized = !tilt_x.is_finite() || !tilt_y.is_finite();
    let tilt = Vec2::new(
        finite_or_zero(tilt_x).clamp(-MAX_TILT, MAX_TILT),
        finite_or_zero(tilt_y).clamp(-MAX_TILT, MAX_TILT),
    );
    (tilt, sanitized)
}

#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    active: bool,
    sensitivity: f32,
    steering_constant: f32,
    visual_tilt_factor: f32,
    torque_constant: f32,
    wind_influence: f32,
    max_speed: f32,
    aero: AeroModel,
    wind: WindModel,
}

impl PhysicsEngine {
    /// Inactive engine using `config` tuning and the given wind model
    pub fn new(config: &FlightConfig, wind: WindModel) -> Self {
        let config = config.clone().sanitized();
        let mut engine = Self {
            active: false,
            sensitivity: 1.0,
            steering_constant: config.steering_constant,
            visual_tilt_factor: config.visual_tilt_factor,
            torque_constant: config.torque_constant,
            wind_influence: config.wind_influence,
            max_speed: config.max_speed,
            aero: AeroModel::from_config(&config),
            wind: wind.with_config(&config),
        };
        engine.set_sensitivity(config.default_sensitivity);
        engine
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        if !self.active {
            log::debug!("Physics engine started");
            self.active = true;
        }
    }

    pub fn stop(&mut self) {
        if self.active {
            log::debug!("Physics engine stopped");
            self.active = false;
        }
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Set input sensitivity, clamped to [0.1, 2.0] (NaN is ignored)
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity.is_nan() {
            return;
        }
        self.sensitivity = sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }

    pub fn aero(&self) -> &AeroModel {
        &self.aero
    }

    pub fn wind(&self) -> &WindModel {
        &self.wind
    }

    pub fn wind_mut(&mut self) -> &mut WindModel {
        &mut self.wind
    }

    /// Apply tilt steering, lift and drag as an impulse on the body's velocity
    pub fn apply_forces(&self, body: &mut FlyingBody, tilt_x: f32, tilt_y: f32) -> ForceReport {
        if body.physics.is_none() {
            return ForceReport::default();
        }
        let (tilt, tilt_sanitized) = sanitize_tilt(tilt_x, tilt_y);
        let lift = self.aero.lift(body);
        let drag = self.aero.drag(body);

        let steering = tilt * self.sensitivity * self.steering_constant;
        let net = steering + LIFT_DIRECTION * lift + drag;

        let mut report = ForceReport {
            tilt_sanitized,
            velocity_reset: false,
        };
        if let Some(physics) = body.physics.as_mut() {
            physics.velocity += net / physics.mass;
            if !physics.velocity.is_finite() {
                physics.velocity = Vec2::ZERO;
                report.velocity_reset = true;
            }
            physics.angular_velocity += tilt.x * physics.turn_rate * self.torque_constant;
            if !physics.angular_velocity.is_finite() {
                physics.angular_velocity = 0.0;
            }
        }
        // Visual only
        body.rotation = tilt.x * self.visual_tilt_factor;

        report
    }

    /// Add the current wind to the body's velocity
    pub fn apply_wind(&self, body: &mut FlyingBody) {
        let push = self.wind.vector() * self.wind_influence;
        if let Some(physics) = body.physics.as_mut() {
            physics.velocity += push;
            if !physics.velocity.is_finite() {
                physics.velocity = Vec2::ZERO;
            }
        }
    }

    /// Add filtered noise scaled by wind strength to the body's velocity
    pub fn apply_turbulence(&mut self, body: &mut FlyingBody) {
        let Some(physics) = body.physics.as_mut() else {
            return;
        };
        let gust = self.wind.sample_turbulence();
        physics.velocity += gust;
        if !physics.velocity.is_finite() {
            physics.velocity = Vec2::ZERO;
        }
    }

    /// Run one frame: wind, forces, wind push, turbulence, integration
    pub fn step(&mut self, body: &mut FlyingBody, tilt_x: f32, tilt_y: f32, dt: f32) -> ForceReport {
        if !self.active {
            return ForceReport::default();
        }
        self.wind.advance(dt);
        let report = self.apply_forces(body, tilt_x, tilt_y);
        self.apply_wind(body);
        self.apply_turbulence(body);
        body.integrate(dt, self.max_speed);

        let integrated = ForceReport {
            tilt_sanitized: false,
            velocity_reset: !body.position.is_finite(),
        };
        if integrated.velocity_reset {
            body.position = Vec2::ZERO;
        }
        report.merge(integrated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::hangar::PlaneSpec;
    use proptest::prelude::*;

    fn engine() -> PhysicsEngine {
        PhysicsEngine::new(&FlightConfig::default(), WindModel::new(1))
    }

    fn body() -> FlyingBody {
        FlyingBody::new(&PlaneSpec::default(), Vec2::ZERO)
    }

    #[test]
    fn test_sensitivity_is_clamped() {
        let mut engine = engine();
        engine.set_sensitivity(3.0);
        assert_eq!(engine.sensitivity(), 2.0);
        engine.set_sensitivity(0.05);
        assert_eq!(engine.sensitivity(), 0.1);
        engine.set_sensitivity(f32::NAN);
        assert_eq!(engine.sensitivity(), 0.1);
        engine.set_sensitivity(f32::INFINITY);
        assert_eq!(engine.sensitivity(), 2.0);
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut engine = engine();
        assert!(!engine.is_active());
        engine.start();
        engine.start();
        assert!(engine.is_active());
        engine.stop();
        engine.stop();
        assert!(!engine.is_active());
    }

    #[test]
    fn test_non_finite_tilt_keeps_velocity_finite() {
        let engine = engine();
        let mut body = body().with_velocity(Vec2::new(10.0, 0.0));
        let report = engine.apply_forces(&mut body, f32::INFINITY, f32::NAN);
        assert!(report.tilt_sanitized);
        let v = body.velocity().unwrap_or(Vec2::NAN);
        assert!(v.is_finite());
        assert!(body.rotation.is_finite());
    }

    #[test]
    fn test_non_finite_tilt_acts_as_neutral() {
        let engine = engine();
        let mut neutral = body().with_velocity(Vec2::new(10.0, 0.0));
        let mut garbage = neutral.clone();
        let _ = engine.apply_forces(&mut neutral, 0.0, 0.0);
        let _ = engine.apply_forces(&mut garbage, f32::NAN, f32::NEG_INFINITY);
        assert_eq!(neutral.velocity(), garbage.velocity());
    }

    #[test]
    fn test_tilt_steers_and_rotates() {
        let engine = engine();
        let mut body = body();
        let report = engine.apply_forces(&mut body, 1.0, 0.0);
        assert!(report.is_clean());
        let v = body.velocity().unwrap_or_default();
        assert!(v.x > 0.0);
        assert!(body.rotation > 0.0);
    }

    #[test]
    fn test_out_of_range_tilt_is_clamped() {
        let engine = engine();
        let mut nominal = body();
        let mut extreme = body();
        let _ = engine.apply_forces(&mut nominal, 1.0, -1.0);
        let _ = engine.apply_forces(&mut extreme, 500.0, -500.0);
        assert_eq!(nominal.velocity(), extreme.velocity());
    }

    #[test]
    fn test_lift_pushes_upward() {
        let engine = engine();
        let mut body = body().with_velocity(Vec2::new(100.0, 0.0));
        let _ = engine.apply_forces(&mut body, 0.0, 0.0);
        assert!(body.velocity().unwrap_or_default().y > 0.0);
    }

    #[test]
    fn test_detached_body_untouched() {
        let mut engine = engine();
        engine.wind_mut().set_vector(0.0, 500.0);
        let mut body = FlyingBody::detached(Vec2::ONE);
        let before = body.clone();
        let report = engine.apply_forces(&mut body, 1.0, 1.0);
        engine.apply_wind(&mut body);
        engine.apply_turbulence(&mut body);
        assert_eq!(body, before);
        assert!(report.is_clean());
    }

    #[test]
    fn test_wind_pushes_body() {
        let mut engine = engine();
        engine.wind_mut().set_vector(0.0, 100.0);
        let mut body = body();
        engine.apply_wind(&mut body);
        let v = body.velocity().unwrap_or_default();
        assert!((v.x - 100.0 * FlightConfig::default().wind_influence).abs() < 1e-4);
    }

    #[test]
    fn test_step_requires_active_engine() {
        let mut engine = engine();
        let mut body = body().with_velocity(Vec2::new(50.0, 0.0));
        let _ = engine.step(&mut body, 0.0, 0.0, SIM_DT);
        assert_eq!(body.position, Vec2::ZERO);

        engine.start();
        let _ = engine.step(&mut body, 0.0, 0.0, SIM_DT);
        assert!(body.position.x > 0.0);
    }

    #[test]
    fn test_raw_extreme_config_is_sanitized() {
        let config = FlightConfig {
            steering_constant: f32::MAX,
            max_speed: f32::MAX,
            wind_influence: f32::MAX,
            drift_strength: 3.0e38,
            drift_direction_degrees: 3.0e38,
            turbulence_scale: f32::MAX,
            ..FlightConfig::default()
        };
        let mut engine = PhysicsEngine::new(&config, WindModel::new(3));
        engine.start();
        engine.wind_mut().set_vector(45.0, 800.0);
        let mut body = body().with_velocity(Vec2::new(150.0, 0.0));
        for i in 0..300 {
            let tilt = if i % 2 == 0 { 1.0 } else { -1.0 };
            let _ = engine.step(&mut body, tilt, tilt, SIM_DT);
            assert!(body.position.is_finite());
            let v = body.velocity().unwrap_or(Vec2::NAN);
            assert!(v.is_finite());
            assert!(v.length() <= crate::consts::MAX_SPEED + 1e-2);
        }
    }

    #[test]
    fn test_tilt_builds_angular_rate_without_driving_rotation() {
        let engine = engine();
        let mut body = body().with_velocity(Vec2::new(50.0, 0.0));
        let _ = engine.apply_forces(&mut body, 1.0, 0.0);
        let rate = body.physics.as_ref().map_or(0.0, |p| p.angular_velocity);
        assert!(rate > 0.0);
        assert_eq!(body.rotation, FlightConfig::default().visual_tilt_factor);

        body.integrate(SIM_DT, 1000.0);
        let damped = body.physics.as_ref().map_or(0.0, |p| p.angular_velocity);
        assert!(damped < rate);
        assert_eq!(body.rotation, FlightConfig::default().visual_tilt_factor);
    }

    #[test]
    fn test_step_advances_wind_transition() {
        let mut engine = engine();
        engine.start();
        engine.wind_mut().transition_to(90.0, 60.0, 1.0);
        let mut body = body();
        for _ in 0..61 {
            let _ = engine.step(&mut body, 0.0, 0.0, SIM_DT);
        }
        assert!(!engine.wind().is_transitioning());
    }

    proptest! {
        #[test]
        fn prop_sensitivity_always_in_range(value in proptest::num::f32::ANY) {
            let mut engine = engine();
            engine.set_sensitivity(value);
            prop_assert!((0.1..=2.0).contains(&engine.sensitivity()));
        }

        #[test]
        fn prop_step_keeps_body_finite(
            tx in proptest::num::f32::ANY,
            ty in proptest::num::f32::ANY,
            strength in 0.0f32..1000.0,
        ) {
            let mut engine = engine();
            engine.start();
            engine.wind_mut().set_vector(45.0, strength);
            let mut body = body();
            for _ in 0..10 {
                let _ = engine.step(&mut body, tx, ty, SIM_DT);
            }
            prop_assert!(body.position.is_finite());
            prop_assert!(body.velocity().is_some_and(|v| v.is_finite()));
        }
    }
}
