//! Flying body entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Category;
use crate::hangar::PlaneSpec;

/// Physical state of a body (absent for purely visual previews)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPhysics {
    pub velocity: Vec2,
    /// Radians per second. Exported for renderers (banking, wobble); the
    /// simulation sets `FlyingBody::rotation` from tilt and never reads this.
    pub angular_velocity: f32,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub lift_multiplier: f32,
    pub drag_multiplier: f32,
    pub turn_rate: f32,
    pub category: Category,
}

impl BodyPhysics {
    pub fn from_spec(spec: &PlaneSpec) -> Self {
        Self {
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            // Zero mass would blow up impulse division
            mass: spec.mass.max(0.01),
            linear_damping: spec.linear_damping.max(0.0),
            angular_damping: spec.angular_damping.max(0.0),
            lift_multiplier: spec.lift_multiplier.max(0.0),
            drag_multiplier: spec.drag_multiplier.max(0.0),
            turn_rate: spec.turn_rate.max(0.0),
            category: Category::FlyingBody,
        }
    }
}

/// The paper airplane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyingBody {
    pub position: Vec2,
    /// Visual tilt angle (radians), rendering only
    pub rotation: f32,
    pub physics: Option<BodyPhysics>,
}

impl FlyingBody {
    pub fn new(spec: &PlaneSpec, position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            physics: Some(BodyPhysics::from_spec(spec)),
        }
    }

    /// A body with no physical state (hangar preview)
    pub fn detached(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            physics: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        if let Some(physics) = self.physics.as_mut() {
            physics.velocity = velocity;
        }
        self
    }

    /// Current velocity (None without physical state)
    pub fn velocity(&self) -> Option<Vec2> {
        self.physics.as_ref().map(|p| p.velocity)
    }

    /// Integrate position from velocity and apply damping
    pub fn integrate(&mut self, dt: f32, max_speed: f32) {
        let Some(physics) = self.physics.as_mut() else {
            return;
        };
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        if !physics.velocity.is_finite() {
            physics.velocity = Vec2::ZERO;
        }
        physics.velocity = physics.velocity.clamp_length_max(max_speed);
        self.position += physics.velocity * dt;

        physics.velocity *= (1.0 - physics.linear_damping * dt).max(0.0);
        physics.angular_velocity *= (1.0 - physics.angular_damping * dt).max(0.0);
        if !physics.angular_velocity.is_finite() {
            physics.angular_velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_moves_and_damps() {
        let spec = PlaneSpec::default();
        let mut body = FlyingBody::new(&spec, Vec2::ZERO).with_velocity(Vec2::new(60.0, 0.0));
        body.integrate(0.5, 1000.0);

        assert!((body.position.x - 30.0).abs() < 1e-4);
        let v = body.velocity().unwrap_or_default();
        assert!(v.x < 60.0 && v.x > 0.0);
    }

    #[test]
    fn test_integrate_caps_speed() {
        let spec = PlaneSpec::default();
        let mut body = FlyingBody::new(&spec, Vec2::ZERO).with_velocity(Vec2::new(5000.0, 0.0));
        body.integrate(1.0, 100.0);
        assert!((body.position.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_detached_body_is_inert() {
        let mut body = FlyingBody::detached(Vec2::new(3.0, 4.0)).with_velocity(Vec2::ONE);
        body.integrate(1.0, 100.0);
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
        assert!(body.velocity().is_none());
    }

    #[test]
    fn test_integrate_recovers_from_non_finite_velocity() {
        let spec = PlaneSpec::default();
        let mut body = FlyingBody::new(&spec, Vec2::ZERO).with_velocity(Vec2::new(f32::NAN, 1.0));
        body.integrate(0.1, 100.0);
        assert!(body.position.is_finite());
        assert_eq!(body.velocity(), Some(Vec2::ZERO));
    }
}
