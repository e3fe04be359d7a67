//! Platform abstraction layer
//!
//! Host-side helpers shared by the browser and native entry points:
//! - `input`: raw key/pointer events to game actions
//! - `clock`: frame timestamps to elapsed real time, FPS readout
//! - `autopilot`: scripted input for headless runs
//! - `hud`: class strings for the DOM overlays

pub mod autopilot;
pub mod clock;
pub mod hud;
pub mod input;

pub use autopilot::Autopilot;
pub use clock::{FpsCounter, FrameClock};
pub use hud::hud_class;
pub use input::{Action, InputEvent, map_input};
