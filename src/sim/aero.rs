//! Lift and drag
//!
//! Arcade aerodynamics: lift grows linearly with speed, drag quadratically.
//! Both read only the body's velocity and its fold multipliers.

use glam::Vec2;

use super::body::FlyingBody;
use crate::config::FlightConfig;
use crate::finite_or_zero;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroModel {
    pub lift_coefficient: f32,
    pub drag_coefficient: f32,
    pub max_drag: f32,
}

impl Default for AeroModel {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default())
    }
}

/// Velocity usable for force computation (non-finite counts as stationary)
fn usable_velocity(body: &FlyingBody) -> Option<Vec2> {
    body.velocity().filter(|v| v.is_finite())
}

impl AeroModel {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            lift_coefficient: finite_or_zero(config.lift_coefficient).max(0.0),
            drag_coefficient: finite_or_zero(config.drag_coefficient).max(0.0),
            max_drag: finite_or_zero(config.max_drag).max(0.0),
        }
    }

    /// Lift magnitude, always finite and >= 0
    pub fn lift(&self, body: &FlyingBody) -> f32 {
        let Some(physics) = body.physics.as_ref() else {
            return 0.0;
        };
        let Some(velocity) = usable_velocity(body) else {
            return 0.0;
        };
        let lift = self.lift_coefficient * velocity.length() * physics.lift_multiplier;
        if lift.is_finite() { lift.max(0.0) } else { 0.0 }
    }

    /// Drag force opposing velocity, magnitude capped at `max_drag`
    pub fn drag(&self, body: &FlyingBody) -> Vec2 {
        let Some(physics) = body.physics.as_ref() else {
            return Vec2::ZERO;
        };
        let Some(velocity) = usable_velocity(body) else {
            return Vec2::ZERO;
        };
        let speed = velocity.length();
        if !speed.is_finite() {
            // Components are finite but the length overflowed; rescale before normalizing
            let direction = (velocity / velocity.abs().max_element()).normalize_or_zero();
            return -direction * self.max_drag;
        }
        if speed <= f32::EPSILON {
            return Vec2::ZERO;
        }
        let magnitude = self.drag_coefficient * physics.drag_multiplier * speed * speed;
        let magnitude = if magnitude.is_finite() {
            magnitude.min(self.max_drag)
        } else {
            self.max_drag
        };
        -(velocity / speed) * magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hangar::{AirplaneType, FoldType, PlaneSpec};
    use proptest::prelude::*;

    fn body_with_velocity(v: Vec2) -> FlyingBody {
        FlyingBody::new(&PlaneSpec::default(), Vec2::ZERO).with_velocity(v)
    }

    #[test]
    fn test_lift_scales_with_speed_and_fold() {
        let aero = AeroModel::default();
        let slow = aero.lift(&body_with_velocity(Vec2::new(10.0, 0.0)));
        let fast = aero.lift(&body_with_velocity(Vec2::new(20.0, 0.0)));
        assert!((fast - 2.0 * slow).abs() < 1e-5);

        let wide = PlaneSpec::resolve(AirplaneType::Classic, FoldType::WideWing);
        let wide_body = FlyingBody::new(&wide, Vec2::ZERO).with_velocity(Vec2::new(10.0, 0.0));
        assert!(aero.lift(&wide_body) > slow);
    }

    #[test]
    fn test_lift_zero_cases() {
        let aero = AeroModel::default();
        assert_eq!(aero.lift(&body_with_velocity(Vec2::ZERO)), 0.0);
        assert_eq!(aero.lift(&FlyingBody::detached(Vec2::ZERO)), 0.0);
        assert_eq!(aero.lift(&body_with_velocity(Vec2::new(f32::INFINITY, 1.0))), 0.0);
        assert_eq!(aero.lift(&body_with_velocity(Vec2::new(1.0, f32::NAN))), 0.0);
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let aero = AeroModel::default();
        let v = Vec2::new(30.0, -40.0);
        let drag = aero.drag(&body_with_velocity(v));
        assert!(drag.dot(v) < 0.0);
        let expected = aero.drag_coefficient * 50.0 * 50.0;
        assert!((drag.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_drag_is_capped() {
        let aero = AeroModel::default();
        let drag = aero.drag(&body_with_velocity(Vec2::new(1.0e6, 0.0)));
        assert!((drag.length() - aero.max_drag).abs() < 1e-3);
        assert_eq!(aero.drag(&body_with_velocity(Vec2::ZERO)), Vec2::ZERO);
        assert_eq!(aero.drag(&body_with_velocity(Vec2::new(f32::NAN, 0.0))), Vec2::ZERO);
    }

    #[test]
    fn test_drag_stays_capped_when_speed_overflows() {
        let aero = AeroModel::default();
        let drag = aero.drag(&body_with_velocity(Vec2::new(1.0e20, 0.0)));
        assert!((drag.length() - aero.max_drag).abs() < 1e-3);
        assert!(drag.x < 0.0);

        let drag = aero.drag(&body_with_velocity(Vec2::new(-3.0e38, 3.0e38)));
        assert!((drag.length() - aero.max_drag).abs() < 1e-3);
        assert!(drag.x > 0.0 && drag.y < 0.0);
    }

    proptest! {
        #[test]
        fn prop_lift_is_finite_and_non_negative(x in proptest::num::f32::ANY, y in proptest::num::f32::ANY) {
            let aero = AeroModel::default();
            let lift = aero.lift(&body_with_velocity(Vec2::new(x, y)));
            prop_assert!(lift.is_finite());
            prop_assert!(lift >= 0.0);
            if !x.is_finite() || !y.is_finite() || (x == 0.0 && y == 0.0) {
                prop_assert_eq!(lift, 0.0);
            }
        }

        #[test]
        fn prop_drag_is_finite_and_bounded(x in -1.0e30f32..1.0e30, y in -1.0e30f32..1.0e30) {
            let aero = AeroModel::default();
            let drag = aero.drag(&body_with_velocity(Vec2::new(x, y)));
            prop_assert!(drag.is_finite());
            prop_assert!(drag.length() <= aero.max_drag + 1e-3);
        }
    }
}
