//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Black and neon green palette
pub mod colors {
    /// #00ff41
    pub const NEON: [f32; 4] = [0.0, 1.0, 0.255, 1.0];
    /// Pieces of the dog that were drawn black
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// #0a0a0a
    pub const SKY_TOP: [f32; 4] = [0.039, 0.039, 0.039, 1.0];
    /// #1a1a1a
    pub const SKY_BOTTOM: [f32; 4] = [0.102, 0.102, 0.102, 1.0];
    /// Clear color behind the letterboxed field
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }
}
