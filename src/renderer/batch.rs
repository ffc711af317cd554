//! CPU-side vertex batching
//!
//! `VertexBatch` is the `DrawSurface` the GPU path uses: every primitive is
//! tessellated, transformed into field coordinates and appended to one
//! triangle list that is uploaded once per frame.

use glam::{Affine2, Vec2};

use super::shapes;
use super::surface::{Color, DrawSurface};
use super::vertex::Vertex;

#[derive(Debug, Clone)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    transform: Affine2,
    stack: Vec<Affine2>,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    fn push(&mut self, local: Vec<Vertex>) {
        let transform = self.transform;
        self.vertices.extend(local.into_iter().map(|v| {
            let p = transform.transform_point2(Vec2::from(v.position));
            Vertex::new(p.x, p.y, v.color)
        }));
    }
}

impl DrawSurface for VertexBatch {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self.transform * Affine2::from_angle(radians);
    }

    fn scale(&mut self, factor: Vec2) {
        self.transform = self.transform * Affine2::from_scale(factor);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.push(shapes::rect(pos, size, color));
    }

    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, width: f32, color: Color) {
        self.push(shapes::rect_outline(pos, size, width, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let segments = shapes::circle_segments(radius);
        self.push(shapes::circle(center, radius, color, segments));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let segments = shapes::circle_segments(radius);
        let half = width / 2.0;
        self.push(shapes::ring(center, radius - half, radius + half, color, segments));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(shapes::thick_line(from, to, width, color));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.push(shapes::convex_polygon(points, color));
    }
}
