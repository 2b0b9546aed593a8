//! Drawing surface abstraction.
//!
//! The field only needs four primitives from its render target: clear,
//! filled circle, stroked line and a backing-store resize. The browser bridge
//! implements this over a Canvas 2D context; [`DrawList`] records commands for
//! headless hosts and tests; the tessellating surface (feature `vectors`)
//! produces a triangle vertex buffer for GPU hosts.

use glam::Vec2;

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, e.g. `rgba(255, 255, 255, 0.5)`.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            channel_u8(self.r),
            channel_u8(self.g),
            channel_u8(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

fn channel_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A 2D raster target the field renders into.
pub trait Surface {
    /// Backend identifier (e.g., "canvas2d", "draw-list", "tessellated").
    fn backend(&self) -> &'static str;

    /// Resize the backing store to `width` x `height` pixels. Implicitly clears.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the rectangle `[0, width) x [0, height)`.
    fn clear(&mut self, width: f32, height: f32);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draw a straight stroked line.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
}

/// Recording surface. Keeps the commands issued since the last `clear`,
/// i.e. exactly one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    width: u32,
    height: u32,
    frames: u64,
    resizes: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Backing store size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of frames started (calls to `clear`).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of backing-store resizes.
    pub fn resizes(&self) -> u64 {
        self.resizes
    }
}

impl Surface for DrawList {
    fn backend(&self) -> &'static str {
        "draw-list"
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.resizes += 1;
        self.commands.clear();
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }
}
