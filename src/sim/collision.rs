//! Collision detection between the character, the field and obstacles
//!
//! Everything here is axis-aligned and pure. Overlap tests are strict, so boxes
//! that only share an edge never collide.

use serde::{Deserialize, Serialize};

use super::character::Character;
use super::obstacle::Obstacle;

/// Axis-aligned rectangle in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Strict overlap test on all four half-planes
#[inline]
pub fn box_intersect(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// True when the character pokes above the top or below the bottom of the field
pub fn check_boundary_collision(character: &Character, field_height: f32) -> bool {
    let bounds = character.bounds();
    bounds.y < 0.0 || bounds.bottom() > field_height
}

/// True when the character overlaps either segment of any obstacle
pub fn check_obstacle_collision(character: &Character, obstacles: &[Obstacle]) -> bool {
    let bounds = character.bounds();
    obstacles
        .iter()
        .flat_map(|o| o.bounds())
        .any(|segment| box_intersect(&bounds, &segment))
}

/// Full per-tick collision query
pub fn check_collision(character: &Character, obstacles: &[Obstacle], field_height: f32) -> bool {
    check_boundary_collision(character, field_height)
        || check_obstacle_collision(character, obstacles)
}
