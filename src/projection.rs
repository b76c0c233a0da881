//! Perspective and viewport transforms.
//!
//! The [`Projection`] holds the scene's focal length, view-volume half width
//! and clip planes together with the output size, and caches the perspective
//! and viewport matrices derived from them. Both are rebuilt only when the
//! output is resized.

use crate::colors::Color;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::render::{Triangle, Vertex};
use crate::scene::SceneParams;

/// Perspective projection and viewport mapping.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Distance from the eye to the projection plane.
    focal: f32,
    /// Half of the horizontal view-volume extent.
    half_width: f32,
    /// Near plane distance (positive).
    near: f32,
    /// Far plane distance (positive, greater than `near`).
    far: f32,
    width: u32,
    height: u32,
    perspective: Mat4,
    viewport: Mat4,
}

impl Projection {
    pub fn new(focal: f32, half_width: f32, near: f32, far: f32, width: u32, height: u32) -> Self {
        let mut projection = Self {
            focal,
            half_width,
            near,
            far,
            width,
            height,
            perspective: Mat4::identity(),
            viewport: Mat4::identity(),
        };
        projection.rebuild();
        projection
    }

    /// Builds the projection for a scene rendered at `width` x `height`.
    pub fn from_params(params: &SceneParams, width: u32, height: u32) -> Self {
        Self::new(
            params.focal,
            params.half_width(),
            params.near,
            params.far,
            width,
            height,
        )
    }

    fn rebuild(&mut self) {
        let aspect = self.aspect_ratio();
        let (n, f) = (self.near, self.far);
        let sx = self.focal / self.half_width;

        self.perspective = Mat4::new([
            [sx, 0.0, 0.0, 0.0],
            [0.0, aspect * sx, 0.0, 0.0],
            [0.0, 0.0, (-n - f) / (f - n), -2.0 * n * f / (f - n)],
            [0.0, 0.0, -1.0, 0.0],
        ]);

        // NDC [-1, 1] onto [0, width] x [height, 0]; y grows downward on screen.
        let half_w = self.width as f32 * 0.5;
        let half_h = self.height as f32 * 0.5;
        self.viewport = Mat4::new([
            [half_w, 0.0, 0.0, half_w],
            [0.0, -half_h, 0.0, half_h],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    /// Updates the output size and rebuilds both matrices.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.rebuild();
    }

    /// Returns the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn perspective(&self) -> Mat4 {
        self.perspective
    }

    pub fn viewport(&self) -> Mat4 {
        self.viewport
    }

    /// Carries three model-space positions to screen space.
    ///
    /// `model_view` is `WorldToCamera * ModelToWorld`. Returns `None`, culling
    /// the whole triangle, when any vertex has camera-space `z >= -near`.
    /// Otherwise each vertex is projected, divided by w and mapped through the
    /// viewport, keeping NDC depth in z.
    pub fn project_triangle(
        &self,
        model_view: &Mat4,
        positions: [Vec3; 3],
        color: Color,
    ) -> Option<Triangle> {
        let camera = positions.map(|p| *model_view * Vec4::point(p.x, p.y, p.z));
        if camera.iter().any(|v| v.z >= -self.near) {
            return None;
        }

        let vertices = camera.map(|v| {
            let ndc = (self.perspective * v).perspective_divide();
            Vertex::new(self.viewport * ndc, color)
        });
        Some(Triangle::new(vertices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const W: u32 = 1280;
    const H: u32 = 960;

    fn projection() -> Projection {
        Projection::new(80.0, 50.0, 1.0, 5000.0, W, H)
    }

    fn triangle_at(z: f32) -> [Vec3; 3] {
        [
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ]
    }

    #[test]
    fn ndc_origin_maps_to_screen_center() {
        let p = projection().viewport() * Vec4::point(0.0, 0.0, 0.3);
        assert_relative_eq!(p.x, W as f32 / 2.0);
        assert_relative_eq!(p.y, H as f32 / 2.0);
        assert_relative_eq!(p.z, 0.3);
    }

    #[test]
    fn viewport_flips_y() {
        let vp = projection().viewport();
        let top = vp * Vec4::point(-1.0, 1.0, 0.0);
        let bottom = vp * Vec4::point(1.0, -1.0, 0.0);
        assert_relative_eq!(top.x, 0.0);
        assert_relative_eq!(top.y, 0.0);
        assert_relative_eq!(bottom.x, W as f32);
        assert_relative_eq!(bottom.y, H as f32);
    }

    #[test]
    fn near_and_far_planes_map_to_ndc_bounds() {
        let proj = projection();
        let near = (proj.perspective() * Vec4::point(0.0, 0.0, -1.0)).perspective_divide();
        let far = (proj.perspective() * Vec4::point(0.0, 0.0, -5000.0)).perspective_divide();
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn view_volume_edge_reaches_screen_edge() {
        // A point half_width to the right at the focal distance lands on x = 1.
        let proj = projection();
        let ndc = (proj.perspective() * Vec4::point(50.0, 0.0, -80.0)).perspective_divide();
        assert_relative_eq!(ndc.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn triangle_on_near_plane_is_culled() {
        let proj = projection();
        let tri = proj.project_triangle(&Mat4::identity(), triangle_at(-1.0), Color::default());
        assert!(tri.is_none());
    }

    #[test]
    fn triangle_just_past_near_plane_is_kept() {
        let proj = projection();
        let tri = proj.project_triangle(&Mat4::identity(), triangle_at(-1.001), Color::default());
        assert!(tri.is_some());
    }

    #[test]
    fn one_vertex_behind_culls_whole_triangle() {
        let proj = projection();
        let mut positions = triangle_at(-10.0);
        positions[2].z = 5.0;
        assert!(proj
            .project_triangle(&Mat4::identity(), positions, Color::default())
            .is_none());
    }

    #[test]
    fn projected_vertices_carry_ndc_depth_and_color() {
        let proj = projection();
        let color = Color::new(0.2, 0.4, 0.6);
        let tri = proj
            .project_triangle(&Mat4::identity(), triangle_at(-100.0), color)
            .unwrap();
        for v in tri.vertices {
            assert!(v.position.z > -1.0 && v.position.z < 1.0);
            assert_relative_eq!(v.position.w, 1.0);
            assert_eq!(v.color, color);
        }
    }

    #[test]
    fn resize_rebuilds_matrices() {
        let mut proj = projection();
        proj.resize(640, 640);
        assert_relative_eq!(proj.aspect_ratio(), 1.0);
        assert_relative_eq!(proj.perspective().get(1, 1), 80.0 / 50.0);
        let center = proj.viewport() * Vec4::point(0.0, 0.0, 0.0);
        assert_relative_eq!(center.x, 320.0);
        assert_relative_eq!(center.y, 320.0);
    }
}
