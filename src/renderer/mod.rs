//! WebGPU rendering module
//!
//! `scene` turns controller state into triangles and a sprite quad;
//! `pipeline` owns the GPU objects and draws a `Scene`.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::{Overlay, Scene, Viewport};
