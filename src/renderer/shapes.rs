//! Shape generation for 2D primitives
//!
//! Turns a draw list into a triangle list. Output is in logical coordinates;
//! the GPU host owns projection.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::{DrawCommand, viewport};

/// Segments used for rings
const RING_SEGMENTS: u32 = 32;

/// Tessellate a whole frame
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in commands {
        match *command {
            DrawCommand::Gradient { top, bottom, alpha } => {
                vertices.extend(gradient(
                    Vec2::ZERO,
                    viewport(),
                    with_alpha(top, alpha),
                    with_alpha(bottom, alpha),
                ));
            }
            DrawCommand::Sprite { sprite, pos, size } => {
                vertices.extend(rect(pos, size, sprite.placeholder()));
            }
            DrawCommand::Ring {
                center,
                radius,
                width,
                color,
            } => {
                let half = width * 0.5;
                vertices.extend(ring(
                    center,
                    radius - half,
                    radius + half,
                    color,
                    RING_SEGMENTS,
                ));
            }
            DrawCommand::Rect { pos, size, color } => {
                vertices.extend(rect(pos, size, color));
            }
        }
    }
    vertices
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    gradient(pos, size, color, color)
}

/// Rectangle whose color blends from `top` to `bottom`
pub fn gradient(pos: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    [
        Vertex::new(x0, y0, top),
        Vertex::new(x1, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y0, top),
        Vertex::new(x1, y1, bottom),
    ]
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + inner_radius * Vec2::from_angle(theta1);
        let outer1 = center + outer_radius * Vec2::from_angle(theta1);
        let inner2 = center + inner_radius * Vec2::from_angle(theta2);
        let outer2 = center + outer_radius * Vec2::from_angle(theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Sprite;

    #[test]
    fn test_rect_covers_bounds() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(4.0, 12.0), [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 14.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 32.0);
    }

    #[test]
    fn test_ring_radius() {
        let verts = ring(Vec2::new(50.0, 50.0), 19.0, 21.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 16 * 6);
        for v in &verts {
            let d = Vec2::from(v.position).distance(Vec2::new(50.0, 50.0));
            assert!((19.0 - 1e-3..=21.0 + 1e-3).contains(&d));
        }
    }

    #[test]
    fn test_tessellate_counts_and_alpha() {
        let commands = [
            DrawCommand::Gradient {
                top: [0.0, 0.0, 0.0, 1.0],
                bottom: [0.1, 0.1, 0.1, 1.0],
                alpha: 0.2,
            },
            DrawCommand::Sprite {
                sprite: Sprite::Star,
                pos: Vec2::ZERO,
                size: Vec2::splat(20.0),
            },
            DrawCommand::Ring {
                center: Vec2::ZERO,
                radius: 20.0,
                width: 2.0,
                color: [0.0, 1.0, 1.0, 1.0],
            },
        ];
        let verts = tessellate(&commands);
        assert_eq!(verts.len(), 6 + 6 + RING_SEGMENTS as usize * 6);
        assert!((verts[0].color[3] - 0.2).abs() < 1e-6);
        assert_eq!(verts[6].color, Sprite::Star.placeholder());
    }
}
