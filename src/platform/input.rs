//! Input mapping
//!
//! The game has exactly one action. Hosts translate their native events into
//! `InputEvent`s and forward whatever `map_input` returns.

use crate::game::GameController;

/// Raw input as seen by a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press, identified by its physical `KeyboardEvent.code`
    KeyDown(String),
    /// Mouse button press on the play surface
    PointerDown,
    /// Finger down on the play surface
    TouchStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
}

pub fn map_input(event: &InputEvent) -> Option<Action> {
    match event {
        InputEvent::KeyDown(code) if code == "Space" => Some(Action::Jump),
        InputEvent::KeyDown(_) => None,
        InputEvent::PointerDown | InputEvent::TouchStart => Some(Action::Jump),
    }
}

impl Action {
    pub fn apply(self, game: &mut GameController) {
        match self {
            Action::Jump => game.on_jump(),
        }
    }
}
