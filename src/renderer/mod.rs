//! Rendering module
//!
//! `scene` turns game state into grid-snapped shapes, `shapes` tessellates
//! them, `pipeline` draws the triangles with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::{SceneStyle, Viewport, build_scene};
pub use shapes::{Shape, tessellate};
pub use vertex::Vertex;
