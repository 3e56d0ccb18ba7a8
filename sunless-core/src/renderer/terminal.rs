use std::io::{self, Write};

use glam::Vec2;

use crate::assets::Texture;
use crate::camera::Camera;
use crate::renderer::{Renderer, TextStyle};
use crate::types::{Color, Rect};

/// Describes each frame as text. Shapes are only listed in verbose mode.
pub struct TerminalRenderer {
    out: Box<dyn Write>,
    verbose: bool,
    lines: Vec<String>,
    in_camera: bool,
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out, verbose: false, lines: Vec::new(), in_camera: false }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Lines collected since the last clear.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Writes the collected frame out.
    pub fn present(&mut self) -> io::Result<()> {
        for line in &self.lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    fn space(&self) -> &'static str {
        if self.in_camera { "world" } else { "screen" }
    }
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self, _color: Color) {
        self.lines.clear();
        self.lines.push("---- frame ----".into());
    }

    fn begin_camera(&mut self, camera: &Camera) {
        self.in_camera = true;
        if self.verbose {
            self.lines.push(format!(
                "[camera] target ({:.1}, {:.1}) zoom {:.2} rot {:.2}",
                camera.target.x, camera.target.y, camera.zoom, camera.rotation
            ));
        }
    }

    fn end_camera(&mut self) {
        self.in_camera = false;
    }

    fn draw_texture(&mut self, source: &str, frame: &Texture, center: Vec2, flipped: bool) {
        self.lines.push(format!(
            "[{}] {} {}x{} at ({:.1}, {:.1}){}",
            self.space(),
            source,
            frame.width,
            frame.height,
            center.x,
            center.y,
            if flipped { " flipped" } else { "" }
        ));
    }

    fn draw_rect(&mut self, rect: Rect, _color: Color) {
        if self.verbose {
            self.lines.push(format!("[rect] ({:.0}, {:.0}, {:.0}, {:.0})", rect.x, rect.y, rect.w, rect.h));
        }
    }

    fn draw_rect_lines(&mut self, rect: Rect, _thickness: f32, _color: Color) {
        if self.verbose {
            self.lines.push(format!("[outline] ({:.0}, {:.0}, {:.0}, {:.0})", rect.x, rect.y, rect.w, rect.h));
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, _thickness: f32, _color: Color) {
        if self.verbose {
            self.lines.push(format!("[line] ({:.0}, {:.0}) -> ({:.0}, {:.0})", from.x, from.y, to.x, to.y));
        }
    }

    fn draw_text(&mut self, text: &str, _position: Vec2, style: TextStyle) {
        let mark = match (style.bold, style.italic) {
            (true, true) => "***",
            (true, false) => "**",
            (false, true) => "*",
            (false, false) => "",
        };
        self.lines.push(format!("[text] {}{}{}", mark, text, mark));
    }
}
