//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock deltas
//! - Seeded RNG only (passed in by the caller)
//! - No rendering, storage or platform dependencies

pub mod character;
pub mod collision;
pub mod obstacle;
pub mod particles;
pub mod physics;
pub mod state;
pub mod timer;

pub use character::Character;
pub use collision::{
    Rect, box_intersect, check_boundary_collision, check_collision, check_obstacle_collision,
};
pub use obstacle::{Obstacle, ObstacleManager};
pub use particles::{Particle, ParticleShape, ParticleSystem, Rgb};
pub use physics::PhysicsEngine;
pub use state::{GameEvent, GamePhase};
pub use timer::Countdown;
