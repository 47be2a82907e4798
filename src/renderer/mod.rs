//! Rendering module
//!
//! The scene is tessellated on the CPU into colored triangles
//! (`scene`, `shapes`) and drawn by a single WebGPU pipeline (`pipeline`).

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{BACKDROP_EASE, Backdrop, DrawList, TextLabel, render_scene};
pub use vertex::{Vertex, colors};
