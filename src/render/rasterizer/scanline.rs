//! Scanline-based triangle rasterization.
//!
//! This module implements triangle rasterization using the classic scanline algorithm
//! with flat-top/flat-bottom triangle decomposition.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y coordinate (top to bottom in screen space)
//! 2. **Decompose** the triangle into flat-top and/or flat-bottom halves
//! 3. **Rasterize** each scanline between the left and right edge intersections
//!
//! # Triangle Decomposition
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1   split
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//!
//!   General triangle      Flat-bottom (top) + Flat-top (bottom)
//! ```
//!
//! # Attribute Interpolation
//!
//! Color and depth are interpolated twice: along the left and right edges using
//! Y progress, then across the span using X progress. This is equivalent to
//! barycentric interpolation, decomposed into two 1D interpolations.
//!
//! # References
//!
//! - Foley, van Dam et al., "Computer Graphics: Principles and Practice"
//! - Abrash, Michael, "Graphics Programming Black Book"

use super::{Rasterizer, Triangle, Vertex};
use crate::render::framebuffer::FrameBuffer;

/// Scanline-based triangle rasterizer.
///
/// Processes pixels in row order and only visits pixels the triangle covers.
/// Input vertices may be in any order; they are sorted internally.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Sorts three vertices by Y coordinate (ascending: top to bottom in screen space).
    ///
    /// After sorting: `v0.y <= v1.y <= v2.y`
    fn sort_vertices(v0: &mut Vertex, v1: &mut Vertex, v2: &mut Vertex) {
        if v1.position.y < v0.position.y {
            std::mem::swap(v0, v1);
        }
        if v2.position.y < v1.position.y {
            std::mem::swap(v1, v2);
        }
        if v1.position.y < v0.position.y {
            std::mem::swap(v0, v1);
        }
    }

    /// Fills one horizontal span between two edge vertices on row `y`.
    #[inline]
    fn fill_span(y: i32, a: &Vertex, b: &Vertex, buffer: &mut FrameBuffer) {
        let (left, right) = if a.position.x < b.position.x {
            (a, b)
        } else {
            (b, a)
        };

        let x_left = left.position.x;
        let x_right = right.position.x;
        let span = x_right - x_left;

        let x_start = (x_left.ceil() as i32).max(0);
        let x_end = (x_right.floor() as i32).min(buffer.width() as i32 - 1);

        for x in x_start..=x_end {
            let tx = if span.abs() < f32::EPSILON {
                0.0
            } else {
                (x as f32 - x_left) / span
            };
            let pixel = left.lerp(right, tx);
            buffer.set_pixel(x, y, pixel.position.z, pixel.color);
        }
    }

    /// Fills a flat-bottom triangle.
    ///
    /// ```text
    ///        v0 (top)
    ///        /\
    ///       /  \
    ///      /____\
    ///    v1      v2  (same Y)
    /// ```
    fn fill_flat_bottom(v0: Vertex, v1: Vertex, v2: Vertex, buffer: &mut FrameBuffer) {
        let height = v1.position.y - v0.position.y;
        if height.abs() < f32::EPSILON {
            return; // Degenerate triangle (zero height)
        }

        let y_start = (v0.position.y.ceil() as i32).max(0);
        let y_end = (v1.position.y.floor() as i32).min(buffer.height() as i32 - 1);

        for y in y_start..=y_end {
            // Vertical progress through the triangle (0 at top, 1 at bottom)
            let t = (y as f32 - v0.position.y) / height;
            let edge1 = v0.lerp(&v1, t);
            let edge2 = v0.lerp(&v2, t);
            Self::fill_span(y, &edge1, &edge2, buffer);
        }
    }

    /// Fills a flat-top triangle.
    ///
    /// ```text
    ///   v0______v1  (same Y)
    ///     \    /
    ///      \  /
    ///       \/
    ///       v2 (bottom)
    /// ```
    fn fill_flat_top(v0: Vertex, v1: Vertex, v2: Vertex, buffer: &mut FrameBuffer) {
        let height = v2.position.y - v0.position.y;
        if height.abs() < f32::EPSILON {
            return;
        }

        let y_start = (v0.position.y.ceil() as i32).max(0);
        let y_end = (v2.position.y.floor() as i32).min(buffer.height() as i32 - 1);

        for y in y_start..=y_end {
            let t = (y as f32 - v0.position.y) / height;
            // Both edges converge on v2 at the bottom
            let edge1 = v0.lerp(&v2, t);
            let edge2 = v1.lerp(&v2, t);
            Self::fill_span(y, &edge1, &edge2, buffer);
        }
    }
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ScanlineRasterizer {
    /// Fills a triangle using the scanline algorithm.
    ///
    /// General triangles are split at the middle vertex's Y level; the split
    /// point lies on edge v0->v2:
    ///
    /// ```text
    /// t = (v1.y - v0.y) / (v2.y - v0.y)
    /// split = lerp(v0, v2, t)
    /// ```
    ///
    /// Interpolating the whole vertex keeps color and depth consistent at the split.
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer) {
        let [mut v0, mut v1, mut v2] = triangle.vertices;
        Self::sort_vertices(&mut v0, &mut v1, &mut v2);

        // Case 1: Already a flat-bottom triangle
        if (v1.position.y - v2.position.y).abs() < f32::EPSILON {
            Self::fill_flat_bottom(v0, v1, v2, buffer);
            return;
        }

        // Case 2: Already a flat-top triangle
        if (v0.position.y - v1.position.y).abs() < f32::EPSILON {
            Self::fill_flat_top(v0, v1, v2, buffer);
            return;
        }

        // Case 3: General triangle - split into flat-bottom + flat-top
        let t = (v1.position.y - v0.position.y) / (v2.position.y - v0.position.y);
        let mut split = v0.lerp(&v2, t);
        split.position.y = v1.position.y;

        Self::fill_flat_bottom(v0, v1, split, buffer);
        Self::fill_flat_top(v1, split, v2, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{covered, flat_triangle, vertex};
    use super::*;
    use crate::colors::{self, Color};

    const RED: Color = Color::new(1.0, 0.0, 0.0);

    #[test]
    fn vertex_order_does_not_matter() {
        let a_tri = flat_triangle([(3.0, 1.0), (12.0, 7.0), (5.0, 14.0)], 0.0, RED);
        let b_tri = flat_triangle([(5.0, 14.0), (3.0, 1.0), (12.0, 7.0)], 0.0, RED);

        let mut a = FrameBuffer::new(16, 16);
        let mut b = FrameBuffer::new(16, 16);
        ScanlineRasterizer::new().fill_triangle(&a_tri, &mut a);
        ScanlineRasterizer::new().fill_triangle(&b_tri, &mut b);
        assert!(covered(&a, colors::WHITE.to_rgb8()) > 0);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn split_point_carries_interpolated_depth() {
        let mut fb = FrameBuffer::new(32, 32);
        let tri = Triangle::new([
            vertex(0.0, 0.0, -1.0, RED),
            vertex(30.0, 10.0, 0.0, RED),
            vertex(0.0, 30.0, 1.0, RED),
        ]);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb);

        // On the long edge x = 0 depth runs linearly from -1 to 1.
        let at_split = fb.get_pixel(0, 10).depth;
        assert!((at_split - (-1.0 + 2.0 * 10.0 / 30.0)).abs() < 1e-4);
    }

    #[test]
    fn rows_outside_buffer_are_skipped() {
        let tri = flat_triangle([(2.0, -50.0), (6.0, 60.0), (-3.0, 60.0)], 0.0, RED);
        let mut fb = FrameBuffer::new(8, 8);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb);
        assert!(covered(&fb, colors::WHITE.to_rgb8()) > 0);
    }
}
