//! Flat-colored triangle vertices
//!
//! `tessellate` emits vertices in screen pixels (origin top-left, y down) with
//! theme colors in sRGB. `RenderState::render` converts both into
//! normalized device coordinates and the target's color space before upload,
//! so the same layout serves the CPU scene and the GPU buffer.

use bytemuck::{Pod, Zeroable};

use crate::settings::Rgba;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Screen pixels while building the scene, NDC once uploaded
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `VertexInput` in `shader.wgsl`
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
