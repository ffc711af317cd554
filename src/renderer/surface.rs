//! The drawing interface the scene is written against
//!
//! Coordinates are logical field units (800x400, y down). Transforms compose
//! like a 2D canvas context: each call applies in the current local frame.

use glam::Vec2;

/// Linear RGBA
pub type Color = [f32; 4];

pub trait DrawSurface {
    /// Push the current transform
    fn save(&mut self);
    /// Pop back to the last saved transform; no-op when nothing is saved
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, factor: Vec2);

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    /// Outline centred on the rectangle's edges
    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Points must describe a convex polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
}
