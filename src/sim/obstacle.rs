//! Gap obstacles: spawning, scrolling, retirement and pass-through scoring

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::collision::Rect;

/// A pair of pipe segments with a vertical gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge, decreases every tick
    pub x: f32,
    pub width: f32,
    /// Vertical center of the gap (fixed at spawn)
    pub gap_y: f32,
    /// Height of the gap (fixed at spawn)
    pub gap_size: f32,
    field_height: f32,
    /// Scored already. Only ever goes false -> true.
    pub passed: bool,
    /// Sparkle burst already emitted. Only ever goes false -> true.
    pub sparkled: bool,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, gap_y: f32, gap_size: f32, field_height: f32) -> Self {
        Self {
            x,
            width,
            gap_y,
            gap_size,
            field_height,
            passed: false,
            sparkled: false,
        }
    }

    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Right edge has left the field on the negative-x side
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Character's left edge is past this obstacle's right edge
    pub fn is_passed_by(&self, character_x: f32) -> bool {
        character_x > self.x + self.width
    }

    pub fn top_height(&self) -> f32 {
        self.gap_y - self.gap_size / 2.0
    }

    pub fn bottom_y(&self) -> f32 {
        self.gap_y + self.gap_size / 2.0
    }

    pub fn bottom_height(&self) -> f32 {
        self.field_height - self.bottom_y()
    }

    /// Center of the gap, where the sparkle burst is emitted
    pub fn gap_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.x + self.width / 2.0, self.gap_y)
    }

    /// `[top, bottom]` segments; they never overlap each other
    pub fn bounds(&self) -> [Rect; 2] {
        [
            Rect::new(self.x, 0.0, self.width, self.top_height()),
            Rect::new(self.x, self.bottom_y(), self.width, self.bottom_height()),
        ]
    }
}

/// Owns every live obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleManager {
    pub field_width: f32,
    pub field_height: f32,
    /// Ticks between spawns
    pub spawn_interval: u64,
    /// Scroll speed (px/tick)
    pub speed: f32,
    pub gap_size: f32,
    pub obstacle_width: f32,
    obstacles: Vec<Obstacle>,
}

impl ObstacleManager {
    pub fn new(
        field_width: f32,
        field_height: f32,
        spawn_interval: u64,
        speed: f32,
        gap_size: f32,
        obstacle_width: f32,
    ) -> Self {
        Self {
            field_width,
            field_height,
            spawn_interval,
            speed,
            gap_size,
            obstacle_width,
            obstacles: Vec::new(),
        }
    }

    /// Spawn on interval ticks, then scroll, then drop what left the field
    pub fn update(&mut self, tick: u64, rng: &mut impl Rng) {
        if self.spawn_interval > 0 && tick.is_multiple_of(self.spawn_interval) {
            self.spawn(rng);
        }

        for obstacle in &mut self.obstacles {
            obstacle.advance(self.speed);
        }

        self.obstacles.retain(|o| !o.is_off_screen());
    }

    /// New obstacle at the right edge, gap center uniform in `[G/2, H - G/2]`
    pub fn spawn(&mut self, rng: &mut impl Rng) {
        let min_gap_y = self.gap_size / 2.0;
        let max_gap_y = self.field_height - self.gap_size / 2.0;
        let gap_y = if max_gap_y > min_gap_y {
            rng.random_range(min_gap_y..=max_gap_y)
        } else {
            min_gap_y
        };

        self.obstacles.push(Obstacle::new(
            self.field_width,
            self.obstacle_width,
            gap_y,
            self.gap_size,
            self.field_height,
        ));
    }

    /// Mark and count obstacles the character has just cleared
    pub fn check_score(&mut self, character: &Character) -> u32 {
        let mut newly_passed = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| !o.passed) {
            if obstacle.is_passed_by(character.pos.x) {
                obstacle.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    /// Drop every obstacle. The tick counter belongs to the caller.
    pub fn reset(&mut self) {
        self.obstacles.clear();
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn manager() -> ObstacleManager {
        ObstacleManager::new(400.0, 600.0, 180, 1.5, 150.0, 60.0)
    }

    #[test]
    fn test_spawn_ticks() {
        let mut m = manager();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawn_ticks = Vec::new();

        for tick in 1..=720 {
            let before = m.obstacles().len();
            m.update(tick, &mut rng);
            // Nothing leaves the field this early, so any growth is a spawn
            if m.obstacles().len() > before {
                spawn_ticks.push(tick);
            }
        }

        assert_eq!(spawn_ticks, vec![180, 360, 540, 720]);
    }

    #[test]
    fn test_spawn_position_and_first_move() {
        let mut m = manager();
        let mut rng = Pcg32::seed_from_u64(7);
        m.update(180, &mut rng);

        let o = &m.obstacles()[0];
        // Spawned at x = W, then advanced once in the same update
        assert!((o.x - 398.5).abs() < 1e-4);
        assert!(o.gap_y >= 75.0 && o.gap_y <= 525.0);
        assert!(!o.passed);
    }

    #[test]
    fn test_off_screen_removed() {
        let mut m = manager();
        m.push(Obstacle::new(-59.0, 60.0, 300.0, 150.0, 600.0));
        m.push(Obstacle::new(-58.0, 60.0, 300.0, 150.0, 600.0));
        let mut rng = Pcg32::seed_from_u64(0);

        // -59 - 1.5 + 60 < 0 -> removed; -58 - 1.5 + 60 = 0.5 -> kept
        m.update(1, &mut rng);
        assert_eq!(m.obstacles().len(), 1);
        assert!((m.obstacles()[0].x - (-59.5)).abs() < 1e-4);
    }

    #[test]
    fn test_right_edge_exactly_zero_is_kept() {
        let o = Obstacle::new(-60.0, 60.0, 300.0, 150.0, 600.0);
        assert!(!o.is_off_screen());
    }

    #[test]
    fn test_check_score_counts_once() {
        let mut m = manager();
        m.push(Obstacle::new(30.0, 60.0, 300.0, 150.0, 600.0));
        let c = Character::new(Vec2::new(100.0, 300.0), Vec2::splat(40.0));

        // 100 > 90 -> passed
        assert_eq!(m.check_score(&c), 1);
        assert_eq!(m.check_score(&c), 0);
        assert!(m.obstacles()[0].passed);
    }

    #[test]
    fn test_check_score_requires_strictly_past() {
        let mut m = manager();
        m.push(Obstacle::new(40.0, 60.0, 300.0, 150.0, 600.0));
        let c = Character::new(Vec2::new(100.0, 300.0), Vec2::splat(40.0));
        assert_eq!(m.check_score(&c), 0);
        assert!(!m.obstacles()[0].passed);
    }

    #[test]
    fn test_check_score_multiple_in_one_call() {
        let mut m = manager();
        m.push(Obstacle::new(0.0, 60.0, 300.0, 150.0, 600.0));
        m.push(Obstacle::new(10.0, 60.0, 300.0, 150.0, 600.0));
        m.push(Obstacle::new(200.0, 60.0, 300.0, 150.0, 600.0));
        let c = Character::new(Vec2::new(100.0, 300.0), Vec2::splat(40.0));
        assert_eq!(m.check_score(&c), 2);
    }

    #[test]
    fn test_reset_clears() {
        let mut m = manager();
        let mut rng = Pcg32::seed_from_u64(3);
        m.spawn(&mut rng);
        m.spawn(&mut rng);
        m.reset();
        assert!(m.obstacles().is_empty());
    }

    #[test]
    fn test_bounds_layout() {
        let o = Obstacle::new(200.0, 60.0, 300.0, 150.0, 600.0);
        let [top, bottom] = o.bounds();
        assert_eq!(top, Rect::new(200.0, 0.0, 60.0, 225.0));
        assert_eq!(bottom, Rect::new(200.0, 375.0, 60.0, 225.0));
        assert_eq!(o.gap_center(), Vec2::new(230.0, 300.0));
    }

    proptest! {
        #[test]
        fn prop_segments_fill_field(seed in any::<u64>(), spawns in 1usize..20) {
            let mut m = manager();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..spawns {
                m.spawn(&mut rng);
            }
            for o in m.obstacles() {
                prop_assert!(o.top_height() >= 0.0);
                prop_assert!(o.bottom_height() >= 0.0);
                let total = o.top_height() + o.gap_size + o.bottom_height();
                prop_assert!((total - 600.0).abs() < 1e-3);
                prop_assert_eq!(o.gap_size, 150.0);
            }
        }

        #[test]
        fn prop_check_score_idempotent(xs in proptest::collection::vec(-60.0f32..400.0, 0..10)) {
            let mut m = manager();
            for x in &xs {
                m.push(Obstacle::new(*x, 60.0, 300.0, 150.0, 600.0));
            }
            let c = Character::new(Vec2::new(100.0, 300.0), Vec2::splat(40.0));
            let first = m.check_score(&c);
            let expected = xs.iter().filter(|x| 100.0 > **x + 60.0).count() as u32;
            prop_assert_eq!(first, expected);
            prop_assert_eq!(m.check_score(&c), 0);
        }
    }
}
