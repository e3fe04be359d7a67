//! Game phases and the events the controller reports to its host

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first jump
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Crash animation; waits for the wall-clock delay before `GameOver`
    Exploding,
    /// Run ended, waiting for the restart input
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::Exploding => "exploding",
            GamePhase::GameOver => "gameOver",
        }
    }

    /// Obstacles, character and score advance only while playing
    pub fn simulates(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }

    /// Phases where bursts left over from the crash keep animating
    pub fn animates_particles_only(&self) -> bool {
        matches!(self, GamePhase::Exploding | GamePhase::GameOver)
    }
}

/// Notable things that happened during a tick or an input, oldest first.
/// Hosts drain these to drive overlays and logging; they never affect the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First jump on the title screen
    Started,
    /// Jump impulse applied
    Jumped,
    /// One or more obstacles cleared this tick
    Scored { total: u32 },
    /// Collision ended the run
    Crashed { score: u32, new_high_score: bool },
    /// Game-over delay elapsed
    GameOver { score: u32, high_score: u32 },
    /// New run started from the game-over screen
    Restarted,
}
