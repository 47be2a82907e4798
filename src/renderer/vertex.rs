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

/// Colors for game elements
pub mod colors {
    /// Opaque color from a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            1.0,
        ]
    }

    /// Same color with a different alpha
    pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }

    pub const ROSE_50: [f32; 4] = hex(0xFFF1F2);
    pub const ORANGE_50: [f32; 4] = hex(0xFFF7ED);
    pub const PURPLE_50: [f32; 4] = hex(0xFAF5FF);
    pub const INDIGO_50: [f32; 4] = hex(0xEEF2FF);
    pub const SKIN: [f32; 4] = hex(0xFFD1DC);
    pub const BODY: [f32; 4] = hex(0xA5B4FC); // Indigo-300
    pub const PROJECTILE: [f32; 4] = hex(0xFB7185); // Rose-400
    pub const TEXT: [f32; 4] = hex(0x475569); // Slate-600
    pub const ACCENT: [f32; 4] = hex(0xF43F5E); // Rose-500
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const INK: [f32; 4] = hex(0x334155); // Slate-700, face strokes
    pub const PUPIL: [f32; 4] = hex(0x1E293B); // Slate-800
    pub const SHADOW: [f32; 4] = with_alpha(TEXT, 0.15);
    pub const BLUSH: [f32; 4] = with_alpha(ACCENT, 0.15);
}
