//! Integer line drawing for wireframe mode.

use super::{Triangle, Vertex};
use crate::render::framebuffer::FrameBuffer;

/// Draws the three edges of a triangle.
pub fn draw_triangle_wireframe(triangle: &Triangle, buffer: &mut FrameBuffer) {
    let [v0, v1, v2] = triangle.vertices;
    draw_line(&v0, &v1, buffer);
    draw_line(&v1, &v2, buffer);
    draw_line(&v2, &v0, buffer);
}

/// Draws a line between two screen-space vertices using the midpoint
/// (Bresenham) algorithm.
///
/// The segment is first clipped to the buffer, so endpoints may lie anywhere,
/// even far off-screen. Only integer arithmetic then decides which pixels to
/// light: an error term tracks the distance between the ideal line and the
/// current pixel, and each step along the major axis also steps the minor axis
/// once the error crosses the midpoint. Both endpoints are drawn.
///
/// Color is interpolated along the line. Lines are not depth-tested; they are
/// written straight into the color plane.
pub fn draw_line(from: &Vertex, to: &Vertex, buffer: &mut FrameBuffer) {
    let Some((from, to)) = clip_to_buffer(from, to, buffer.width(), buffer.height()) else {
        return;
    };

    let x0 = from.position.x as i32;
    let y0 = from.position.y as i32;
    let x1 = to.position.x as i32;
    let y1 = to.position.y as i32;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();

    let steps = dx.max(dy);
    if steps == 0 {
        buffer.set_pixel_overlay(x0, y0, from.color);
        return;
    }

    let x_incr_direction = if x0 < x1 { 1 } else { -1 };
    let y_incr_direction = if y0 < y1 { 1 } else { -1 };

    // Positive error favors x movement, negative favors y.
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;
    let mut step = 0;

    loop {
        let t = step as f32 / steps as f32;
        buffer.set_pixel_overlay(x, y, from.color.lerp(to.color, t));

        if x == x1 && y == y1 {
            break;
        }

        step += 1;

        // Doubled so the midpoint comparison stays in integers.
        let e2 = 2 * err;

        if e2 > -dy {
            err -= dy;
            x += x_incr_direction;
        }

        // Both branches may fire, giving a diagonal step.
        if e2 < dx {
            err += dx;
            y += y_incr_direction;
        }
    }
}

/// A buffer edge that cut a segment end.
#[derive(Clone, Copy)]
enum Edge {
    X(f64),
    Y(f64),
}

/// Clips a segment to the closed rectangle `[0, width] x [0, height]`
/// (Liang-Barsky).
///
/// Returns `None` when no part of the segment is inside or a coordinate is
/// not finite. Cut ends are placed exactly on the edge that cut them, and
/// their color is interpolated at the same parameter. The work is done in
/// f64 so that far-away endpoints keep enough precision.
fn clip_to_buffer(
    from: &Vertex,
    to: &Vertex,
    width: u32,
    height: u32,
) -> Option<(Vertex, Vertex)> {
    let (x0, y0) = (from.position.x as f64, from.position.y as f64);
    let (x1, y1) = (to.position.x as f64, to.position.y as f64);
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return None;
    }

    let (x_max, y_max) = (width as f64, height as f64);
    let (dx, dy) = (x1 - x0, y1 - y0);

    let mut t0 = 0.0;
    let mut t1 = 1.0;
    let mut enter = None;
    let mut exit = None;

    // (p, q, edge): the segment is inside that edge where p * t <= q.
    let edges = [
        (-dx, x0, Edge::X(0.0)),
        (dx, x_max - x0, Edge::X(x_max)),
        (-dy, y0, Edge::Y(0.0)),
        (dy, y_max - y0, Edge::Y(y_max)),
    ];
    for (p, q, edge) in edges {
        if p == 0.0 {
            // Parallel to this edge.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            if t > t0 {
                t0 = t;
                enter = Some(edge);
            }
        } else {
            if t < t0 {
                return None;
            }
            if t < t1 {
                t1 = t;
                exit = Some(edge);
            }
        }
    }

    let place = |end: &Vertex, t: f64, edge: Option<Edge>| -> Vertex {
        let Some(edge) = edge else {
            return *end;
        };
        let mut v = from.lerp(to, t as f32);
        match edge {
            Edge::X(x) => v.position.x = x as f32,
            Edge::Y(y) => v.position.y = y as f32,
        }
        v.position.x = v.position.x.clamp(0.0, x_max as f32);
        v.position.y = v.position.y.clamp(0.0, y_max as f32);
        v
    };

    Some((place(from, t0, enter), place(to, t1, exit)))
}
