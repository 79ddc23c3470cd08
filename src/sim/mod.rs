//! Flight simulation module
//!
//! All physics and session logic lives here. Single-threaded and cooperative:
//! - Every tick runs to completion; nothing blocks
//! - Seeded RNG only (wind drift and turbulence)
//! - Malformed input is neutralized, never surfaced as an error
//! - No rendering or platform dependencies

pub mod aero;
pub mod body;
pub mod collision;
pub mod engine;
pub mod state;
pub mod tick;
pub mod wind;

pub use aero::AeroModel;
pub use body::{BodyPhysics, FlyingBody};
pub use collision::{Category, CategorySet, CollisionOutcome, CollisionResolver};
pub use engine::{ForceReport, PhysicsEngine, sanitize_tilt};
pub use state::{GameMode, GameState, GameStatus, SessionRecord};
pub use tick::{Flight, TickInput, WindDirective};
pub use wind::{WindModel, WindVector};
