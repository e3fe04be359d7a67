//! Flappy Kiro - A side-scrolling gap-flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, particles)
//! - `game`: The game controller state machine driving `sim` once per tick
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native input and timing abstraction
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::GameController;
pub use highscores::ScoreStore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Logical playfield dimensions, shared by every subsystem
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Character spawn point (top-left corner of its box) and size
    pub const CHARACTER_START_X: f32 = 100.0;
    pub const CHARACTER_START_Y: f32 = 300.0;
    pub const CHARACTER_SIZE: f32 = 40.0;
    /// Velocity to rotation factor (radians per px/tick)
    pub const ROTATION_FACTOR: f32 = 0.05;
    /// Nose-up tilt limit (-30 degrees)
    pub const MIN_ROTATION: f32 = -std::f32::consts::PI / 6.0;
    /// Nose-down tilt limit (90 degrees)
    pub const MAX_ROTATION: f32 = std::f32::consts::FRAC_PI_2;

    /// Physics (per tick)
    pub const GRAVITY: f32 = 0.3;
    pub const JUMP_POWER: f32 = -6.0;
    pub const MAX_FALL_SPEED: f32 = 10.0;

    /// Obstacles
    pub const SPAWN_INTERVAL: u64 = 180;
    pub const OBSTACLE_SPEED: f32 = 1.5;
    pub const GAP_SIZE: f32 = 150.0;
    pub const OBSTACLE_WIDTH: f32 = 60.0;

    /// Particle bursts
    pub const EXPLOSION_COUNT: usize = 30;
    pub const SPARKLE_COUNT: usize = 8;
    pub const CONFETTI_COUNT: usize = 50;
    /// Lifetime lost by every particle each tick
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Downward acceleration applied to confetti
    pub const CONFETTI_GRAVITY: f32 = 0.15;
    /// Fraction of vertical speed kept on a floor bounce
    pub const BOUNCE_RETENTION: f32 = 0.5;

    /// Real time between the crash and the game-over screen
    pub const GAME_OVER_DELAY: Duration = Duration::from_millis(500);
}

/// Lerp between `min` and `max` with `t` in [0, 1)
#[inline]
pub fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_limits_in_radians() {
        assert!((consts::MIN_ROTATION.to_degrees() - (-30.0)).abs() < 1e-4);
        assert!((consts::MAX_ROTATION.to_degrees() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(3.0, 6.0, 0.0), 3.0);
        assert!((lerp(3.0, 6.0, 0.5) - 4.5).abs() < 1e-6);
    }
}
