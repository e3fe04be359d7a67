//! Particle effects: trail, explosion, sparkle and confetti bursts
//!
//! Particles are visual only and never feed back into gameplay. Every particle
//! loses a fixed amount of lifetime per tick and is dropped the tick its
//! lifetime reaches zero, so its alpha (`life / max_life`) fades from 1 to 0.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::{BOUNCE_RETENTION, CONFETTI_GRAVITY, PARTICLE_DECAY};
use crate::lerp;

/// 8-bit RGB color, resolved once at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA with the given alpha
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha,
        ]
    }
}

/// Brand and effect palettes
pub mod palette {
    use super::Rgb;

    pub const KIRO_PURPLE: Rgb = Rgb::new(0x79, 0x0e, 0xcb);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const GRAY: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

    pub const EXPLOSION: [Rgb; 3] = [
        Rgb::new(0xff, 0x44, 0x44),
        Rgb::new(0xff, 0x88, 0x44),
        Rgb::new(0xff, 0xaa, 0x44),
    ];
    pub const SPARKLE: [Rgb; 3] = [WHITE, Rgb::new(0xff, 0xff, 0x00), KIRO_PURPLE];
    pub const CONFETTI: [Rgb; 3] = [KIRO_PURPLE, WHITE, GRAY];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleShape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

impl ParticleShape {
    /// Distance from the center to the bottom edge (used for floor bounces)
    pub fn half_height(&self) -> f32 {
        match *self {
            ParticleShape::Circle { radius } => radius,
            ParticleShape::Rect { height, .. } => height / 2.0,
        }
    }
}

/// A single visual particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime, decreases by `PARTICLE_DECAY` per tick
    pub life: f32,
    /// Lifetime at spawn
    pub max_life: f32,
    pub color: Rgb,
    pub shape: ParticleShape,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Extra downward acceleration per tick
    pub gravity: Option<f32>,
    /// Floor height the particle bounces off
    pub bounce_floor: Option<f32>,
}

impl Particle {
    fn new(
        pos: Vec2,
        vel: Vec2,
        life: f32,
        color: Rgb,
        shape: ParticleShape,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            color,
            shape,
            rotation: 0.0,
            rotation_speed: (rng.random::<f32>() - 0.5) * 0.2,
            gravity: None,
            bounce_floor: None,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        if let Some(g) = self.gravity {
            self.vel.y += g;
        }

        self.pos += self.vel;
        self.life -= PARTICLE_DECAY;
        self.rotation += self.rotation_speed;

        if let Some(floor) = self.bounce_floor {
            let rest_y = floor - self.shape.half_height();
            if self.pos.y >= rest_y {
                self.pos.y = rest_y;
                self.vel.y = -self.vel.y.abs() * BOUNCE_RETENTION;
            }
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Render opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Unordered pool of live particles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// One small purple puff with a slight random drift
    pub fn spawn_trail(&mut self, pos: Vec2, rng: &mut impl Rng) {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 1.5,
            (rng.random::<f32>() - 0.5) * 1.5,
        );
        let radius = lerp(3.0, 5.0, rng.random());
        let particle = Particle::new(
            pos,
            vel,
            1.0,
            palette::KIRO_PURPLE,
            ParticleShape::Circle { radius },
            rng,
        );
        self.particles.push(particle);
    }

    /// Radial burst, evenly spaced angles, 3-6 px/tick
    pub fn spawn_explosion(&mut self, pos: Vec2, count: usize, rng: &mut impl Rng) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = lerp(3.0, 6.0, rng.random());
            let vel = Vec2::from_angle(angle) * speed;
            let life = lerp(1.5, 2.0, rng.random());
            let color = pick(&palette::EXPLOSION, rng);
            let radius = lerp(4.0, 8.0, rng.random());
            let shape = ParticleShape::Circle { radius };
            let particle = Particle::new(pos, vel, life, color, shape, rng);
            self.particles.push(particle);
        }
    }

    /// Rising sparkles with a slight sideways drift
    pub fn spawn_sparkles(&mut self, pos: Vec2, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0,
                -lerp(2.0, 4.0, rng.random()),
            );
            let life = lerp(1.0, 1.5, rng.random());
            let color = pick(&palette::SPARKLE, rng);
            let radius = lerp(3.0, 6.0, rng.random());
            let shape = ParticleShape::Circle { radius };
            let particle = Particle::new(pos, vel, life, color, shape, rng);
            self.particles.push(particle);
        }
    }

    /// Spinning rectangles falling from the top edge and bouncing on the floor
    pub fn spawn_confetti(&mut self, count: usize, field: Vec2, rng: &mut impl Rng) {
        for _ in 0..count {
            let pos = Vec2::new(rng.random::<f32>() * field.x, 0.0);
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0,
                lerp(2.0, 4.0, rng.random()),
            );
            let life = lerp(3.0, 4.0, rng.random());
            let color = pick(&palette::CONFETTI, rng);
            let shape = ParticleShape::Rect {
                width: lerp(6.0, 10.0, rng.random()),
                height: lerp(10.0, 15.0, rng.random()),
            };
            let mut particle = Particle::new(pos, vel, life, color, shape, rng);
            particle.rotation = rng.random::<f32>() * TAU;
            particle.gravity = Some(CONFETTI_GRAVITY);
            particle.bounce_floor = Some(field.y);
            self.particles.push(particle);
        }
    }

    /// Advance every particle, then drop the dead ones
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.is_dead());
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn pick(colors: &[Rgb], rng: &mut impl Rng) -> Rgb {
    colors.choose(rng).copied().unwrap_or(palette::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn radius(p: &Particle) -> f32 {
        match p.shape {
            ParticleShape::Circle { radius } => radius,
            ParticleShape::Rect { .. } => panic!("expected a circle"),
        }
    }

    #[test]
    fn test_trail_profile() {
        let mut rng = rng();
        let mut ps = ParticleSystem::new();
        for _ in 0..100 {
            ps.spawn_trail(Vec2::new(110.0, 320.0), &mut rng);
        }
        assert_eq!(ps.len(), 100);
        for p in ps.particles() {
            assert_eq!(p.life, 1.0);
            assert!(p.vel.x.abs() <= 0.75 && p.vel.y.abs() <= 0.75);
            assert!((3.0..5.0).contains(&radius(p)));
            assert_eq!(p.color, palette::KIRO_PURPLE);
            assert!(p.rotation_speed.abs() <= 0.1);
            assert!(p.gravity.is_none() && p.bounce_floor.is_none());
        }
    }

    #[test]
    fn test_explosion_profile() {
        let mut rng = rng();
        let mut ps = ParticleSystem::new();
        let center = Vec2::new(120.0, 320.0);
        ps.spawn_explosion(center, 30, &mut rng);
        assert_eq!(ps.len(), 30);

        for (i, p) in ps.particles().iter().enumerate() {
            let speed = p.vel.length();
            assert!(speed >= 3.0 - 1e-4 && speed <= 6.0 + 1e-4);
            let expected = Vec2::from_angle(TAU * i as f32 / 30.0);
            assert!(p.vel.normalize().dot(expected) > 0.999);
            assert!((1.5..=2.0).contains(&p.life));
            assert!((4.0..=8.0).contains(&radius(p)));
            assert!(palette::EXPLOSION.contains(&p.color));
            assert_eq!(p.pos, center);
        }
    }

    #[test]
    fn test_sparkle_profile() {
        let mut rng = rng();
        let mut ps = ParticleSystem::new();
        ps.spawn_sparkles(Vec2::new(230.0, 300.0), 8, &mut rng);
        assert_eq!(ps.len(), 8);
        for p in ps.particles() {
            assert!(p.vel.x.abs() <= 1.0);
            assert!(p.vel.y <= -2.0 && p.vel.y >= -4.0);
            assert!((1.0..=1.5).contains(&p.life));
            assert!((3.0..=6.0).contains(&radius(p)));
            assert!(palette::SPARKLE.contains(&p.color));
        }
    }

    #[test]
    fn test_confetti_profile() {
        let mut rng = rng();
        let mut ps = ParticleSystem::new();
        let field = Vec2::new(400.0, 600.0);
        ps.spawn_confetti(50, field, &mut rng);
        assert_eq!(ps.len(), 50);
        for p in ps.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x < 400.0);
            assert_eq!(p.pos.y, 0.0);
            assert!(p.vel.x.abs() <= 1.0);
            assert!(p.vel.y >= 2.0 && p.vel.y <= 4.0);
            assert!((3.0..=4.0).contains(&p.life));
            match p.shape {
                ParticleShape::Rect { width, height } => {
                    assert!((6.0..=10.0).contains(&width));
                    assert!((10.0..=15.0).contains(&height));
                }
                ParticleShape::Circle { .. } => panic!("confetti must be rectangular"),
            }
            assert!((0.0..=TAU).contains(&p.rotation));
            assert_eq!(p.gravity, Some(CONFETTI_GRAVITY));
            assert_eq!(p.bounce_floor, Some(600.0));
        }
    }

    #[test]
    fn test_update_integrates() {
        let mut rng = rng();
        let mut ps = ParticleSystem::new();
        ps.spawn_trail(Vec2::ZERO, &mut rng);
        let before = ps.particles()[0].clone();

        ps.update();

        let after = &ps.particles()[0];
        assert_eq!(after.pos, before.pos + before.vel);
        assert!((after.life - 0.98).abs() < 1e-6);
        assert!((after.rotation - before.rotation_speed).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_applied_before_move() {
        let mut rng = rng();
        let mut ps = ParticleSystem::new();
        ps.spawn_confetti(1, Vec2::new(400.0, 600.0), &mut rng);
        let before = ps.particles()[0].clone();

        ps.update();

        let after = &ps.particles()[0];
        let vy = before.vel.y + CONFETTI_GRAVITY;
        assert!((after.vel.y - vy).abs() < 1e-5);
        assert!((after.pos.y - vy).abs() < 1e-5);
    }

    #[test]
    fn test_floor_bounce() {
        let mut rng = rng();
        let mut p = Particle::new(
            Vec2::new(50.0, 590.0),
            Vec2::new(0.0, 4.0),
            3.0,
            palette::WHITE,
            ParticleShape::Rect {
                width: 8.0,
                height: 12.0,
            },
            &mut rng,
        );
        p.bounce_floor = Some(600.0);

        p.update();

        assert_eq!(p.pos.y, 594.0);
        assert!((p.vel.y - (-2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_trail_lives_fifty_ticks() {
        let mut rng = rng();
        let mut ps = ParticleSystem::new();
        ps.spawn_trail(Vec2::ZERO, &mut rng);

        let mut ticks = 0;
        while !ps.is_empty() {
            ps.update();
            ticks += 1;
            assert!(ticks <= 51);
        }
        // 1.0 / 0.02 ticks, give or take float rounding on the last step
        assert!((49..=51).contains(&ticks));
    }

    #[test]
    fn test_clear() {
        let mut rng = rng();
        let mut ps = ParticleSystem::new();
        ps.spawn_explosion(Vec2::ZERO, 20, &mut rng);
        ps.clear();
        assert!(ps.is_empty());
    }

    #[test]
    fn test_color_with_alpha() {
        let rgba = palette::KIRO_PURPLE.with_alpha(0.5);
        assert!((rgba[0] - 121.0 / 255.0).abs() < 1e-6);
        assert!((rgba[1] - 14.0 / 255.0).abs() < 1e-6);
        assert!((rgba[2] - 203.0 / 255.0).abs() < 1e-6);
        assert_eq!(rgba[3], 0.5);
    }

    proptest! {
        #[test]
        fn prop_alpha_fades_until_removal(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ps = ParticleSystem::new();
            ps.spawn_explosion(Vec2::new(200.0, 300.0), 5, &mut rng);
            ps.spawn_sparkles(Vec2::new(200.0, 300.0), 3, &mut rng);
            ps.spawn_confetti(3, Vec2::new(400.0, 600.0), &mut rng);

            let mut previous: Vec<f32> = ps.particles().iter().map(|p| p.alpha()).collect();
            prop_assert!(previous.iter().all(|a| *a == 1.0));

            while !ps.is_empty() {
                ps.update();
                for p in ps.particles() {
                    prop_assert!(p.life > 0.0);
                    let a = p.alpha();
                    prop_assert!((0.0..=1.0).contains(&a));
                }
                let current: Vec<f32> = ps.particles().iter().map(|p| p.alpha()).collect();
                prop_assert!(current.len() <= previous.len());
                previous = current;
            }
        }

        #[test]
        fn prop_single_particle_alpha_strictly_decreasing(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ps = ParticleSystem::new();
            ps.spawn_sparkles(Vec2::ZERO, 1, &mut rng);
            let mut last = ps.particles()[0].alpha();
            while !ps.is_empty() {
                ps.update();
                if let Some(p) = ps.particles().first() {
                    prop_assert!(p.alpha() < last);
                    last = p.alpha();
                }
            }
        }
    }
}
