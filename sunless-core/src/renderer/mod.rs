pub mod terminal;

use glam::Vec2;

use crate::assets::Texture;
use crate::camera::Camera;
use crate::types::{Color, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    /// Centre the text on the position instead of anchoring its top-left corner.
    pub centered: bool,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self { size, color, bold: false, italic: false, centered: false }
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}

/// Drawing surface the game renders into. Coordinates are screen space
/// unless a camera is active.
pub trait Renderer {
    fn clear(&mut self, color: Color);

    fn begin_camera(&mut self, camera: &Camera);
    fn end_camera(&mut self);

    /// Draws `frame` centred on `center`. `source` is the asset path it came from.
    fn draw_texture(&mut self, source: &str, frame: &Texture, center: Vec2, flipped: bool);

    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_rect_lines(&mut self, rect: Rect, thickness: f32, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);
    fn draw_text(&mut self, text: &str, position: Vec2, style: TextStyle);

    /// Height of one line of text at `size`.
    fn line_height(&self, size: f32) -> f32 {
        size * 1.2
    }
}
