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
}

/// `0xRRGGBB` to RGBA floats
pub const fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const CRITTER: [f32; 4] = rgb(0x00E8FF, 1.0);
    pub const METEOR: [f32; 4] = rgb(0xBB3333, 1.0);
    pub const STAR: [f32; 4] = rgb(0xFFFF00, 1.0);
    pub const SHIELD: [f32; 4] = rgb(0x00FFFF, 1.0);
    pub const LASER: [f32; 4] = rgb(0xFF00FF, 1.0);
    pub const TOKEN: [f32; 4] = rgb(0x00FF00, 1.0);
    pub const SIDEKICK: [f32; 4] = rgb(0xFF66FF, 1.0);
    pub const TINT_TOP: [f32; 4] = rgb(0x000000, 1.0);
    pub const TINT_BOTTOM: [f32; 4] = rgb(0x111111, 1.0);
}
