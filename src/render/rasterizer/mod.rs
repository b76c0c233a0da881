//! Triangle and line rasterization.
//!
//! Two fill algorithms are provided and can be swapped at runtime for
//! comparison and benchmarking. Both interpolate vertex color and depth
//! linearly in screen space and depth-test every pixel.
//!
//! Available algorithms:
//! - [`EdgeFunctionRasterizer`]: Bounding box iteration with edge function tests
//! - [`ScanlineRasterizer`]: Flat-top/flat-bottom triangle decomposition
//!
//! Lines are clipped to the buffer and drawn by [`draw_line`] with integer
//! midpoint stepping.

mod edgefunction;
mod line;
mod scanline;

pub use edgefunction::EdgeFunctionRasterizer;
pub use line::{draw_line, draw_triangle_wireframe};
pub use scanline::ScanlineRasterizer;

use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::math::vec4::Vec4;

/// A render-time vertex: homogeneous position plus color.
///
/// Built fresh for every draw from shared geometry and the face color. Once
/// projected, `position` holds pixel x/y, NDC depth in z and w = 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub color: Color,
}

impl Vertex {
    pub fn new(position: Vec4, color: Color) -> Self {
        Self { position, color }
    }

    /// Interpolate position and color together.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            color: self.color.lerp(other.color, t),
        }
    }
}

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(vertices: [Vertex; 3]) -> Self {
        Self { vertices }
    }

    /// Replace each vertex color with its depth mapped to gray, `(z + 1) / 2`.
    ///
    /// Interpolating these colors renders a depth map: black at the near plane,
    /// white at the far plane.
    pub fn with_depth_colors(mut self) -> Self {
        for vertex in &mut self.vertices {
            vertex.color = Color::gray((vertex.position.z + 1.0) * 0.5);
        }
        self
    }
}

/// Trait for triangle fill algorithms.
///
/// Implementors write interpolated, depth-tested pixels through
/// [`FrameBuffer::set_pixel`]. This allows swapping between strategies
/// (scanline, edge functions) for testing and benchmarking.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer);
}

/// Available fill algorithms.
///
/// Can be changed at runtime via `Engine::set_rasterizer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerType {
    /// Edge function rasterizer that tests each pixel in the bounding box.
    /// Barycentric weights fall out of the edge tests directly.
    #[default]
    EdgeFunction,
    /// Scanline rasterizer using flat-top/flat-bottom triangle decomposition.
    Scanline,
}

impl std::fmt::Display for RasterizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterizerType::EdgeFunction => write!(f, "EdgeFunction"),
            RasterizerType::Scanline => write!(f, "Scanline"),
        }
    }
}

/// Holds both rasterizer implementations and forwards to the active one.
pub struct RasterizerDispatcher {
    scanline: ScanlineRasterizer,
    edge_function: EdgeFunctionRasterizer,
    active: RasterizerType,
}

impl RasterizerDispatcher {
    pub fn new(rasterizer_type: RasterizerType) -> Self {
        Self {
            scanline: ScanlineRasterizer::new(),
            edge_function: EdgeFunctionRasterizer::new(),
            active: rasterizer_type,
        }
    }

    pub fn set_type(&mut self, rasterizer_type: RasterizerType) {
        self.active = rasterizer_type;
    }

    pub fn active_type(&self) -> RasterizerType {
        self.active
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer) {
        match self.active {
            RasterizerType::EdgeFunction => self.edge_function.fill_triangle(triangle, buffer),
            RasterizerType::Scanline => self.scanline.fill_triangle(triangle, buffer),
        }
    }
}
