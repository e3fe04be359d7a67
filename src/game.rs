//! Game controller
//!
//! Owns every simulation component and drives them once per host tick.
//! Phase flow: Start -> Playing -> Exploding -> GameOver -> Playing.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::ScoreStore;
use crate::sim::{
    Character, Countdown, GameEvent, GamePhase, ObstacleManager, ParticleSystem, PhysicsEngine,
    check_collision,
};
use crate::tuning::Tuning;

/// The whole game: simulation state, phase machine and high score.
///
/// Hosts call [`tick`](Self::tick) once per frame, [`on_jump`](Self::on_jump)
/// for every jump input and [`advance_time`](Self::advance_time) with the real
/// time elapsed since the previous frame.
#[derive(Debug)]
pub struct GameController {
    tuning: Tuning,
    phase: GamePhase,
    character: Character,
    physics: PhysicsEngine,
    obstacles: ObstacleManager,
    particles: ParticleSystem,
    rng: Pcg32,
    score: u32,
    /// Ticks spent in `Playing` since the run started
    frame_count: u64,
    new_high_score: bool,
    game_over_timer: Option<Countdown>,
    scores: ScoreStore,
    events: Vec<GameEvent>,
}

impl GameController {
    pub fn new(tuning: Tuning, scores: ScoreStore, seed: u64) -> Self {
        log::info!(
            "Game ready (field {}x{}, high score {})",
            tuning.field_width,
            tuning.field_height,
            scores.high_score()
        );
        Self {
            character: tuning.new_character(),
            physics: tuning.physics,
            obstacles: tuning.new_obstacle_manager(),
            particles: ParticleSystem::new(),
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            frame_count: 0,
            new_high_score: false,
            game_over_timer: None,
            scores,
            events: Vec::new(),
            tuning,
        }
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) {
        if self.phase.simulates() {
            self.step_playing();
        } else if self.phase.animates_particles_only() {
            self.particles.update();
        }
    }

    /// One host frame. Time passes before the tick, so a crash on this tick
    /// waits out the full delay.
    pub fn frame(&mut self, elapsed: Duration) {
        self.advance_time(elapsed);
        self.tick();
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
    }

    fn step_playing(&mut self) {
        self.frame_count += 1;
        self.obstacles.update(self.frame_count, &mut self.rng);

        self.physics.apply_gravity(&mut self.character);
        self.physics.update_position(&mut self.character);
        self.character.update_rotation();

        self.particles
            .spawn_trail(self.character.trail_anchor(), &mut self.rng);
        self.particles.update();

        if check_collision(
            &self.character,
            self.obstacles.obstacles(),
            self.tuning.field_height,
        ) {
            self.crash();
            return;
        }

        let passed = self.obstacles.check_score(&self.character);
        for obstacle in self.obstacles.obstacles_mut() {
            if obstacle.passed && !obstacle.sparkled {
                obstacle.sparkled = true;
                self.particles.spawn_sparkles(
                    obstacle.gap_center(),
                    self.tuning.sparkle_count,
                    &mut self.rng,
                );
            }
        }
        if passed > 0 {
            self.score += passed;
            log::info!("Score: {}", self.score);
            self.events.push(GameEvent::Scored { total: self.score });
        }
    }

    fn crash(&mut self) {
        self.particles.spawn_explosion(
            self.character.center(),
            self.tuning.explosion_count,
            &mut self.rng,
        );

        self.new_high_score = self.scores.is_new_high_score(self.score);
        if self.new_high_score {
            self.particles.spawn_confetti(
                self.tuning.confetti_count,
                self.tuning.field_size(),
                &mut self.rng,
            );
        }
        self.scores.save_score(self.score);

        log::info!(
            "Crashed at score {} after {} ticks",
            self.score,
            self.frame_count
        );
        self.set_phase(GamePhase::Exploding);
        self.game_over_timer = Some(Countdown::new(self.tuning.game_over_delay()));
        self.events.push(GameEvent::Crashed {
            score: self.score,
            new_high_score: self.new_high_score,
        });
    }

    /// The single player action. Meaning depends on the phase.
    pub fn on_jump(&mut self) {
        match self.phase {
            GamePhase::Start => {
                self.set_phase(GamePhase::Playing);
                self.score = 0;
                log::info!("Game started");
                self.events.push(GameEvent::Started);
                self.jump();
            }
            GamePhase::Playing => self.jump(),
            GamePhase::Exploding => {}
            GamePhase::GameOver => self.restart(),
        }
    }

    fn jump(&mut self) {
        self.physics.apply_jump(&mut self.character);
        log::debug!("Jump at y={:.1}", self.character.pos.y);
        self.events.push(GameEvent::Jumped);
    }

    /// Fresh run straight into `Playing`, without a jump impulse
    fn restart(&mut self) {
        self.character.reset(self.tuning.character_start);
        self.obstacles.reset();
        self.particles.clear();
        self.score = 0;
        self.frame_count = 0;
        self.new_high_score = false;
        self.game_over_timer = None;
        self.set_phase(GamePhase::Playing);
        log::info!("Restarted");
        self.events.push(GameEvent::Restarted);
    }

    /// Feed real elapsed time to the crash-to-game-over delay
    pub fn advance_time(&mut self, elapsed: Duration) {
        if self.phase != GamePhase::Exploding {
            return;
        }
        let Some(timer) = self.game_over_timer.as_mut() else {
            return;
        };
        if timer.advance(elapsed) {
            self.game_over_timer = None;
            self.set_phase(GamePhase::GameOver);
            log::info!(
                "Game over: score {}, high score {}",
                self.score,
                self.scores.high_score()
            );
            self.events.push(GameEvent::GameOver {
                score: self.score,
                high_score: self.scores.high_score(),
            });
        }
    }

    /// Take every event recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    /// Whether the run that just ended beat the previous high score
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
