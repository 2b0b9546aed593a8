//! Lyon-based tessellating surface.
//!
//! Turns a rendered frame into a flat triangle list (6 floats per vertex) that
//! a GPU host can upload directly instead of replaying Canvas 2D calls.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::surface::{Color, Surface};

/// Per-vertex data for the triangle list.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self {
            x,
            y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

struct FillCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

struct StrokeCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Surface that tessellates every draw call into a triangle list.
pub struct TessellatedSurface {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
    width: u32,
    height: u32,
    tolerance: f32,
}

impl TessellatedSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
            width,
            height,
            tolerance: 0.1,
        }
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    /// The buffer viewed as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw pointer to the flat float buffer (for wasm memory reads).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.as_floats().as_ptr()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Expand indexed geometry into the flat triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            self.vertices.push(self.geometry.vertices[*idx as usize]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }
}

impl Surface for TessellatedSurface {
    fn backend(&self) -> &'static str {
        "tessellated"
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.vertices.clear();
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.vertices.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();

        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(self.tolerance),
            &mut BuffersBuilder::new(&mut self.geometry, FillCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if width <= 0.0 || color.a <= 0.0 || from == to {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.line_to(point(to.x, to.y));
        builder.end(false);
        let path = builder.build();

        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(self.tolerance).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }
}
