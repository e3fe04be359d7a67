//! Data-driven game balance
//!
//! Every gameplay constant in one serializable struct. `Tuning::default()` is
//! the reference game; hosts may load overrides from JSON. Values are trusted
//! as given.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Character, ObstacleManager, PhysicsEngine};

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Character ===
    pub character_start: Vec2,
    pub character_size: Vec2,

    // === Physics ===
    pub physics: PhysicsEngine,

    // === Obstacles ===
    /// Ticks between spawns
    pub spawn_interval: u64,
    /// Scroll speed (px/tick)
    pub obstacle_speed: f32,
    pub gap_size: f32,
    pub obstacle_width: f32,

    // === Effects ===
    pub explosion_count: usize,
    pub sparkle_count: usize,
    pub confetti_count: usize,

    /// Real time between the crash and the game-over screen (ms)
    pub game_over_delay_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            character_start: Vec2::new(CHARACTER_START_X, CHARACTER_START_Y),
            character_size: Vec2::splat(CHARACTER_SIZE),

            physics: PhysicsEngine::default(),

            spawn_interval: SPAWN_INTERVAL,
            obstacle_speed: OBSTACLE_SPEED,
            gap_size: GAP_SIZE,
            obstacle_width: OBSTACLE_WIDTH,

            explosion_count: EXPLOSION_COUNT,
            sparkle_count: SPARKLE_COUNT,
            confetti_count: CONFETTI_COUNT,

            game_over_delay_ms: GAME_OVER_DELAY.as_millis() as u64,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    pub fn game_over_delay(&self) -> Duration {
        Duration::from_millis(self.game_over_delay_ms)
    }

    pub fn new_character(&self) -> Character {
        Character::new(self.character_start, self.character_size)
    }

    pub fn new_obstacle_manager(&self) -> ObstacleManager {
        ObstacleManager::new(
            self.field_width,
            self.field_height,
            self.spawn_interval,
            self.obstacle_speed,
            self.gap_size,
            self.obstacle_width,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        let t = Tuning::default();
        assert_eq!(t.field_size(), Vec2::new(400.0, 600.0));
        assert_eq!(t.physics, PhysicsEngine::new(0.3, -6.0, 10.0));
        assert_eq!(t.spawn_interval, 180);
        assert_eq!(t.obstacle_speed, 1.5);
        assert_eq!(t.gap_size, 150.0);
        assert_eq!(t.game_over_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "spawn_interval": 90, "gap_size": 180.0 }"#).unwrap();
        assert_eq!(t.spawn_interval, 90);
        assert_eq!(t.gap_size, 180.0);
        assert_eq!(t.field_width, 400.0);
        assert_eq!(t.physics.jump_power, -6.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let t = Tuning::default();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), t);
    }

    #[test]
    fn test_bad_json() {
        assert!(Tuning::from_json("{ nope").is_err());
    }

    #[test]
    fn test_builders_use_field() {
        let t = Tuning::default();
        let m = t.new_obstacle_manager();
        assert_eq!(m.field_width, 400.0);
        assert_eq!(m.field_height, 600.0);
        let c = t.new_character();
        assert_eq!(c.pos, Vec2::new(100.0, 300.0));
        assert_eq!(c.width, 40.0);
    }
}
