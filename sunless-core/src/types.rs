use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };
    pub const RED: Self = Self { r: 230, g: 41, b: 55, a: 255 };
    pub const GREEN: Self = Self { r: 0, g: 228, b: 48, a: 255 };
    pub const YELLOW: Self = Self { r: 253, g: 249, b: 0, a: 255 };
    pub const PINK: Self = Self { r: 255, g: 109, b: 194, a: 255 };

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn gray(value: f32, alpha: f32) -> Self {
        let v = (value.clamp(0.0, 1.0) * 255.0) as u8;
        Self::rgba(v, v, v, 0).with_alpha(alpha)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
        self
    }

    /// Linear blend toward `other` by `t`.
    pub fn blend(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::rgba(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b), mix(self.a, other.a))
    }

    pub fn darken(self, t: f32) -> Self {
        self.blend(Color::rgba(0, 0, 0, self.a), t)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - 0.5 * w, center.y - 0.5 * h, w, h)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Edges count as inside. Empty rectangles contain nothing.
    pub fn contains(&self, point: Vec2) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + 0.5 * self.w, self.y + 0.5 * self.h)
    }

    /// Grows every edge by `amount`; negative values shrink.
    pub fn expand(&self, amount: f32) -> Rect {
        let w = (self.w + amount * 2.0).max(0.0);
        let h = (self.h + amount * 2.0).max(0.0);
        Rect::new(self.x - amount, self.y - amount, w, h)
    }

    pub fn shrink(&self, amount: f32) -> Rect {
        if self.w <= amount * 2.0 || self.h <= amount * 2.0 {
            return Rect::new(self.x, self.y, 0.0, 0.0);
        }
        self.expand(-amount)
    }

    pub fn split_top(&self, height: f32) -> (Rect, Rect) {
        let h = height.min(self.h);
        let top = Rect::new(self.x, self.y, self.w, h);
        let rest = Rect::new(self.x, self.y + h, self.w, self.h - h);
        (top, rest)
    }

    pub fn translate(&self, offset: Vec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}
