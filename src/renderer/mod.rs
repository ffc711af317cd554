//! Rendering
//!
//! The scene is written against the `DrawSurface` trait. On the web a
//! `VertexBatch` tessellates it into one triangle list per frame and
//! `RenderState` draws that list with WebGPU.

pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use batch::VertexBatch;
pub use pipeline::{RenderState, field_to_ndc};
pub use scene::draw_scene;
pub use surface::{Color, DrawSurface};
pub use vertex::Vertex;
