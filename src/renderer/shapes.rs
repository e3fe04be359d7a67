//! Triangle-list generation for 2D primitives
//!
//! Everything is emitted in field coordinates (y down); the pipeline maps to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Axis-aligned filled rectangle, two triangles
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Stroke centered on the rectangle's edges, like a canvas `strokeRect`
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = thickness / 2.0;
    let outer_w = r.width + thickness;
    let edges = [
        Rect::new(r.x - h, r.y - h, outer_w, thickness),
        Rect::new(r.x - h, r.bottom() - h, outer_w, thickness),
        Rect::new(r.x - h, r.y + h, thickness, r.height - thickness),
        Rect::new(r.right() - h, r.y + h, thickness, r.height - thickness),
    ];

    let mut vertices = Vec::with_capacity(24);
    for edge in edges.iter().filter(|e| e.width > 0.0 && e.height > 0.0) {
        vertices.extend_from_slice(&rect(edge, color));
    }
    vertices
}

/// Rectangle of `size` centered on `center`, rotated by `rotation` radians
pub fn rotated_rect(center: Vec2, size: Vec2, rotation: f32, color: [f32; 4]) -> [Vertex; 6] {
    let [tl, tr, bl, br] = rotated_corners(center, size, rotation);
    [
        Vertex::new(tl.x, tl.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(bl.x, bl.y, color),
        Vertex::new(bl.x, bl.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(br.x, br.y, color),
    ]
}

/// `[top-left, top-right, bottom-left, bottom-right]` before rotation
pub fn rotated_corners(center: Vec2, size: Vec2, rotation: f32) -> [Vec2; 4] {
    let half = size / 2.0;
    let rot = Vec2::from_angle(rotation);
    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(-half.x, half.y),
        Vec2::new(half.x, half.y),
    ]
    .map(|corner| center + rot.rotate(corner))
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
