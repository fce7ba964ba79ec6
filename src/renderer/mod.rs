//! WebGPU rendering module
//!
//! The scene is a batch of alpha-blended rectangles built from the game state.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, pixel_to_ndc};
pub use shapes::{Rect, scene_rects, scene_vertices};
pub use vertex::Vertex;
