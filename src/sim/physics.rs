//! Gravity and jump integration for the character

use serde::{Deserialize, Serialize};

use super::character::Character;
use crate::consts::{GRAVITY, JUMP_POWER, MAX_FALL_SPEED};

/// Per-tick vertical physics. Values are trusted, not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsEngine {
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Upward velocity set by a jump (negative)
    pub jump_power: f32,
    /// Terminal falling speed
    pub max_velocity: f32,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(GRAVITY, JUMP_POWER, MAX_FALL_SPEED)
    }
}

impl PhysicsEngine {
    pub fn new(gravity: f32, jump_power: f32, max_velocity: f32) -> Self {
        Self {
            gravity,
            jump_power,
            max_velocity,
        }
    }

    /// Accelerate downward, capped at the terminal speed. Upward speed is not capped.
    pub fn apply_gravity(&self, character: &mut Character) {
        character.velocity = (character.velocity + self.gravity).min(self.max_velocity);
    }

    /// Jumps set the velocity outright; they do not stack.
    pub fn apply_jump(&self, character: &mut Character) {
        character.velocity = self.jump_power;
    }

    pub fn update_position(&self, character: &mut Character) {
        character.pos.y += character.velocity;
    }
}
