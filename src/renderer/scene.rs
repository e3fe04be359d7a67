//! Frame description built from controller state
//!
//! Pure data, no GPU types beyond the vertex structs, so it is tested natively.
//! Draw order: background clear, obstacles, particles, character sprite, dimming
//! overlay. Text is not drawn here; hosts show it from [`Overlay`].

use glam::Vec2;

use super::shapes;
use super::vertex::{SpriteVertex, Vertex, colors};
use crate::game::GameController;
use crate::settings::Settings;
use crate::sim::{GamePhase, Particle, ParticleShape, Rect};

/// Obstacle border thickness (px)
const BORDER_WIDTH: f32 = 2.0;

/// Which text screen is visible. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Title screen
    Start { high_score: u32 },
    /// Live score at the top of the field
    Score(u32),
    GameOver {
        score: u32,
        high_score: u32,
        new_high_score: bool,
    },
    /// Crash animation, no text
    None,
}

impl Overlay {
    pub fn for_controller(game: &GameController) -> Self {
        match game.phase() {
            GamePhase::Start => Overlay::Start {
                high_score: game.high_score(),
            },
            GamePhase::Playing => Overlay::Score(game.score()),
            GamePhase::Exploding => Overlay::None,
            GamePhase::GameOver => Overlay::GameOver {
                score: game.score(),
                high_score: game.high_score(),
                new_high_score: game.is_new_high_score(),
            },
        }
    }

    /// Full-field dim color drawn over the world
    pub fn dim_color(&self) -> Option<[f32; 4]> {
        match self {
            Overlay::Start { .. } => Some(colors::START_DIM),
            Overlay::GameOver { .. } => Some(colors::GAME_OVER_DIM),
            Overlay::Score(_) | Overlay::None => None,
        }
    }
}

/// Everything needed to draw one frame, in field coordinates
#[derive(Debug, Clone)]
pub struct Scene {
    /// Obstacles then particles
    pub world: Vec<Vertex>,
    /// Character sprite quad, two triangles
    pub sprite: [SpriteVertex; 6],
    /// Dimming drawn on top of the sprite
    pub dim: Vec<Vertex>,
    pub overlay: Overlay,
}

impl Scene {
    pub fn build(game: &GameController, settings: &Settings) -> Self {
        let mut world = Vec::new();

        for obstacle in game.obstacles().obstacles() {
            for segment in obstacle.bounds() {
                world.extend_from_slice(&shapes::rect(&segment, colors::OBSTACLE_FILL));
                world.extend(shapes::rect_outline(
                    &segment,
                    BORDER_WIDTH,
                    colors::OBSTACLE_BORDER,
                ));
            }
        }

        let segments = settings.quality.circle_segments();
        for particle in game.particles().particles() {
            push_particle(&mut world, particle, segments);
        }

        let character = game.character();
        let sprite = sprite_quad(
            character.center(),
            Vec2::new(character.width, character.height),
            character.rotation,
        );

        let overlay = Overlay::for_controller(game);
        let field = game.tuning().field_size();
        let dim = overlay
            .dim_color()
            .map(|color| shapes::rect(&Rect::new(0.0, 0.0, field.x, field.y), color).to_vec())
            .unwrap_or_default();

        Self {
            world,
            sprite,
            dim,
            overlay,
        }
    }
}

fn push_particle(out: &mut Vec<Vertex>, particle: &Particle, segments: u32) {
    let color = particle.color.with_alpha(particle.alpha());
    match particle.shape {
        ParticleShape::Circle { radius } => {
            out.extend(shapes::circle(particle.pos, radius, color, segments));
        }
        ParticleShape::Rect { width, height } => {
            out.extend_from_slice(&shapes::rotated_rect(
                particle.pos,
                Vec2::new(width, height),
                particle.rotation,
                color,
            ));
        }
    }
}

/// Rotated quad with the full texture mapped upright
pub fn sprite_quad(center: Vec2, size: Vec2, rotation: f32) -> [SpriteVertex; 6] {
    let [tl, tr, bl, br] = shapes::rotated_corners(center, size, rotation);
    [
        SpriteVertex::new(tl.x, tl.y, 0.0, 0.0),
        SpriteVertex::new(tr.x, tr.y, 1.0, 0.0),
        SpriteVertex::new(bl.x, bl.y, 0.0, 1.0),
        SpriteVertex::new(bl.x, bl.y, 0.0, 1.0),
        SpriteVertex::new(tr.x, tr.y, 1.0, 0.0),
        SpriteVertex::new(br.x, br.y, 1.0, 1.0),
    ]
}

/// Letterboxed mapping from the logical field onto a pixel surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface size in pixels
    pub surface: Vec2,
    /// Logical field size
    pub field: Vec2,
}

impl Viewport {
    pub fn new(surface_width: u32, surface_height: u32, field: Vec2) -> Self {
        Self {
            surface: Vec2::new(surface_width as f32, surface_height as f32),
            field,
        }
    }

    /// Uniform pixels per field unit, fitting the whole field
    pub fn scale(&self) -> f32 {
        (self.surface.x / self.field.x).min(self.surface.y / self.field.y)
    }

    /// Field point to normalized device coordinates (y up)
    pub fn to_ndc(&self, p: Vec2) -> [f32; 2] {
        let scale = self.scale();
        let offset = (self.surface - self.field * scale) / 2.0;
        let px = offset + p * scale;
        [
            px.x / self.surface.x * 2.0 - 1.0,
            1.0 - px.y / self.surface.y * 2.0,
        ]
    }

    pub fn map_vertices(&self, vertices: &[Vertex]) -> Vec<Vertex> {
        vertices
            .iter()
            .map(|v| Vertex {
                position: self.to_ndc(Vec2::from(v.position)),
                color: v.color,
            })
            .collect()
    }

    pub fn map_sprite(&self, vertices: &[SpriteVertex]) -> Vec<SpriteVertex> {
        vertices
            .iter()
            .map(|v| SpriteVertex {
                position: self.to_ndc(Vec2::from(v.position)),
                uv: v.uv,
            })
            .collect()
    }
}
