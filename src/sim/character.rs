//! The player-controlled character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Player entity: a fixed-size box that only moves vertically
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Top-left corner of the collision box
    pub pos: Vec2,
    /// Vertical speed in px/tick (negative is upward)
    pub velocity: f32,
    /// Visual tilt in radians, derived from velocity
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Character {
    fn default() -> Self {
        Self::new(
            Vec2::new(CHARACTER_START_X, CHARACTER_START_Y),
            Vec2::splat(CHARACTER_SIZE),
        )
    }
}

impl Character {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            velocity: 0.0,
            rotation: 0.0,
            width: size.x,
            height: size.y,
        }
    }

    /// Axis-aligned collision box. Rotation is cosmetic and never applied here.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// Where the trail is emitted: the center-back of the sprite
    pub fn trail_anchor(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 4.0, self.height / 2.0)
    }

    /// Tilt for the current velocity: nose-up when rising, nose-down when falling
    pub fn target_rotation(&self) -> f32 {
        (self.velocity * ROTATION_FACTOR).clamp(MIN_ROTATION, MAX_ROTATION)
    }

    pub fn update_rotation(&mut self) {
        self.rotation = self.target_rotation();
    }

    /// Return to the spawn point at rest
    pub fn reset(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.velocity = 0.0;
        self.rotation = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_follows_velocity() {
        let mut c = Character::default();
        c.velocity = 2.0;
        c.update_rotation();
        assert!((c.rotation - 0.1).abs() < 1e-6);

        c.velocity = -2.0;
        c.update_rotation();
        assert!((c.rotation + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_saturates() {
        let mut c = Character::default();
        c.velocity = -100.0;
        c.update_rotation();
        assert_eq!(c.rotation, MIN_ROTATION);

        c.velocity = 100.0;
        c.update_rotation();
        assert_eq!(c.rotation, MAX_ROTATION);
    }

    #[test]
    fn test_bounds_ignore_rotation() {
        let mut c = Character::default();
        c.rotation = 1.0;
        let b = c.bounds();
        assert_eq!((b.x, b.y, b.width, b.height), (100.0, 300.0, 40.0, 40.0));
    }

    #[test]
    fn test_anchors() {
        let c = Character::default();
        assert_eq!(c.center(), Vec2::new(120.0, 320.0));
        assert_eq!(c.trail_anchor(), Vec2::new(110.0, 320.0));
    }

    #[test]
    fn test_reset() {
        let mut c = Character::default();
        c.pos.y = 12.0;
        c.velocity = 7.0;
        c.rotation = 0.35;
        c.reset(Vec2::new(100.0, 300.0));
        assert_eq!(c.pos, Vec2::new(100.0, 300.0));
        assert_eq!(c.velocity, 0.0);
        assert_eq!(c.rotation, 0.0);
    }
}
