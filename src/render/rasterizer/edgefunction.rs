//! Edge function-based triangle rasterization.
//!
//! This module implements triangle rasterization using the edge function algorithm,
//! which is the foundation of modern GPU rasterization. The algorithm tests each
//! pixel against three edge equations to determine triangle coverage.
//!
//! # Algorithm Overview
//!
//! 1. Compute a bounding box around the triangle, clipped to the buffer
//! 2. For each pixel center in the box, evaluate three edge functions
//! 3. A pixel is inside the triangle if all edge functions have the same sign
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! # Barycentric Coordinates
//!
//! The edge function values are proportional to barycentric coordinates:
//!
//! ```text
//! lambda_i = E_i(P) / (E_0 + E_1 + E_2)
//! ```
//!
//! Where E_i is the edge function for the edge opposite to vertex i. The same
//! weights interpolate color and depth.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::{Rasterizer, Triangle};
use crate::colors::Color;
use crate::render::framebuffer::FrameBuffer;

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates over all pixels in the triangle's bounding box and uses edge
/// functions to decide coverage. Handles both winding orders.
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    /// Creates a new edge function rasterizer instance.
    pub fn new() -> Self {
        EdgeFunctionRasterizer {}
    }

    /// Signed area of the parallelogram spanned by (B - A) and (P - A).
    ///
    /// Positive when P is left of AB, negative when right, zero on the edge.
    #[inline]
    fn edge_function(ax: f32, ay: f32, bx: f32, by: f32, px: f32, py: f32) -> f32 {
        (px - ax) * (by - ay) - (py - ay) * (bx - ax)
    }
}

impl Default for EdgeFunctionRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer) {
        let [v0, v1, v2] = triangle.vertices;
        let (p0, p1, p2) = (v0.position, v1.position, v2.position);

        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Compute bounding box
        // ─────────────────────────────────────────────────────────────────────
        let min_x = p0.x.min(p1.x).min(p2.x).floor() as i32;
        let max_x = p0.x.max(p1.x).max(p2.x).ceil() as i32;
        let min_y = p0.y.min(p1.y).min(p2.y).floor() as i32;
        let max_y = p0.y.max(p1.y).max(p2.y).ceil() as i32;

        // Clip to framebuffer bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(buffer.width() as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(buffer.height() as i32 - 1);

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Compute signed area (2x triangle area)
        // ─────────────────────────────────────────────────────────────────────
        let area = Self::edge_function(p0.x, p0.y, p1.x, p1.y, p2.x, p2.y);
        if area.abs() < f32::EPSILON {
            return; // Degenerate triangle
        }
        let inv_area = 1.0 / area;

        let colors: [Color; 3] = [v0.color, v1.color, v2.color];

        // ─────────────────────────────────────────────────────────────────────
        // Step 3: Iterate over all pixels in bounding box
        // ─────────────────────────────────────────────────────────────────────
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let w0 = Self::edge_function(p1.x, p1.y, p2.x, p2.y, px, py);
                let w1 = Self::edge_function(p2.x, p2.y, p0.x, p0.y, px, py);
                let w2 = Self::edge_function(p0.x, p0.y, p1.x, p1.y, px, py);

                // Inside test (handles both CW and CCW winding)
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };

                if inside {
                    let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
                    let z = lambda[0] * p0.z + lambda[1] * p1.z + lambda[2] * p2.z;
                    buffer.set_pixel(x, y, z, Color::blend(colors, lambda));
                }
            }
        }
    }
}
