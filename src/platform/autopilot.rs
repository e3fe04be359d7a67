//! Demo pilot for headless runs
//!
//! Steers toward the gap of the nearest obstacle ahead, or the field center
//! when none is on screen. Good enough to score a few points, not to play
//! forever.

use crate::game::GameController;
use crate::sim::GamePhase;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Jump when the character's center sinks this far below the target
    pub slack: f32,
    /// Restart automatically from the game-over screen
    pub restart: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            slack: 12.0,
            restart: true,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to press jump this frame
    pub fn wants_jump(&self, game: &GameController) -> bool {
        match game.phase() {
            GamePhase::Start => true,
            GamePhase::Exploding => false,
            GamePhase::GameOver => self.restart,
            GamePhase::Playing => {
                let character = game.character();
                let target_y = game
                    .obstacles()
                    .obstacles()
                    .iter()
                    .filter(|o| o.x + o.width >= character.pos.x)
                    .min_by(|a, b| a.x.total_cmp(&b.x))
                    .map(|o| o.gap_y)
                    .unwrap_or(game.tuning().field_height / 2.0);

                character.velocity >= 0.0 && character.center().y > target_y + self.slack
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::ScoreStore;
    use crate::persistence::MemoryStore;
    use crate::tuning::Tuning;

    fn controller() -> GameController {
        GameController::new(
            Tuning::default(),
            ScoreStore::load(Box::new(MemoryStore::new())),
            42,
        )
    }

    #[test]
    fn test_starts_the_game() {
        let game = controller();
        assert!(Autopilot::new().wants_jump(&game));
    }

    #[test]
    fn test_keeps_character_airborne() {
        let mut game = controller();
        let pilot = Autopilot::new();
        // Long enough for gravity alone to hit the floor many times over
        for _ in 0..170 {
            if pilot.wants_jump(&game) {
                game.on_jump();
            }
            game.tick();
        }
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_never_jumps_while_exploding() {
        let mut game = controller();
        game.on_jump();
        while game.phase() == GamePhase::Playing {
            game.tick();
        }
        assert!(!Autopilot::new().wants_jump(&game));
    }
}
