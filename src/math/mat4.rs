//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```ignore
//! let rigid = translation * rotation;  // rotation applied first, then translation
//! let world = parent_rigid * rigid;    // parent frames compose on the left
//! ```

use std::ops::{Add, Mul};

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column (column-major convention).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Outer (tensor) product `u ⊗ v` in the upper-left 3x3 block.
    ///
    /// The homogeneous row and column are left at zero so the result can be
    /// summed with other 3x3 terms.
    pub fn outer(u: Vec3, v: Vec3) -> Self {
        Mat4::new([
            [u.x * v.x, u.x * v.y, u.x * v.z, 0.0],
            [u.y * v.x, u.y * v.y, u.y * v.z, 0.0],
            [u.z * v.x, u.z * v.y, u.z * v.z, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ])
    }

    /// Skew-symmetric cross-product matrix `K(u)`, so that `K(u) * v == u × v`.
    pub fn skew(u: Vec3) -> Self {
        Mat4::new([
            [0.0, -u.z, u.y, 0.0],
            [u.z, 0.0, -u.x, 0.0],
            [-u.y, u.x, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ])
    }

    /// Rotation of `angle` radians about a unit `axis` (Rodrigues' formula).
    ///
    /// ```text
    /// R = I·cos θ + (axis ⊗ axis)·(1 − cos θ) + K(axis)·sin θ
    /// ```
    ///
    /// Positive angles turn counter-clockwise when looking down the axis
    /// toward the origin.
    pub fn axis_angle(axis: Vec3, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut m = Mat4::identity() * cos
            + Mat4::outer(axis, axis) * (1.0 - cos)
            + Mat4::skew(axis) * sin;
        m.data[3][3] = 1.0;
        m
    }

    /// Rotation whose columns are the given frame vectors.
    ///
    /// Maps the local X, Y and Z axes onto `x_axis`, `y_axis` and `z_axis`.
    pub fn from_axes(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        Mat4::new([
            [x_axis.x, y_axis.x, z_axis.x, 0.0],
            [x_axis.y, y_axis.y, z_axis.y, 0.0],
            [x_axis.z, y_axis.z, z_axis.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns column `col` as a Vec3 (the homogeneous row is dropped).
    #[inline]
    pub fn column(&self, col: usize) -> Vec3 {
        Vec3::new(self.data[0][col], self.data[1][col], self.data[2][col])
    }

    /// Transforms a direction (w = 0); translation is ignored.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::direction(v.x, v.y, v.z)).to_vec3()
    }

    /// Transforms a point (w = 1) without any perspective division.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::point(p.x, p.y, p.z)).to_vec3()
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Element-wise scaling.
impl Mul<f32> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: f32) -> Self::Output {
        let mut result = self.data;
        for row in result.iter_mut() {
            for value in row.iter_mut() {
                *value *= rhs;
            }
        }
        Mat4::new(result)
    }
}

/// Element-wise sum.
impl Add<Mat4> for Mat4 {
    type Output = Mat4;

    fn add(self, rhs: Mat4) -> Self::Output {
        let mut result = self.data;
        for (row, rhs_row) in result.iter_mut().zip(rhs.data.iter()) {
            for (value, rhs_value) in row.iter_mut().zip(rhs_row.iter()) {
                *value += rhs_value;
            }
        }
        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn skew_matches_cross_product() {
        let u = Vec3::new(1.0, 2.0, 3.0);
        let v = Vec3::new(-4.0, 0.5, 2.0);
        assert_vec_eq(Mat4::skew(u).transform_vector(v), u.cross(v));
    }

    #[test]
    fn axis_angle_about_y_turns_forward_left() {
        let r = Mat4::axis_angle(Vec3::UP, FRAC_PI_2);
        // Forward is -Z; a positive quarter turn about +Y swings it to -X.
        assert_vec_eq(r.transform_vector(Vec3::FORWARD), Vec3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(r.get(3, 3), 1.0);
    }

    #[test]
    fn axis_angle_zero_is_identity() {
        let r = Mat4::axis_angle(Vec3::new(0.0, 0.6, 0.8), 0.0);
        assert_eq!(r, Mat4::identity());
    }

    #[test]
    fn axis_angle_keeps_axis_fixed() {
        let axis = Vec3::new(1.0, 1.0, 1.0).normalize();
        let r = Mat4::axis_angle(axis, 1.234);
        assert_vec_eq(r.transform_vector(axis), axis);
    }

    #[test]
    fn translation_moves_points_not_vectors() {
        let t = Mat4::translation(10.0, 0.0, -2.0);
        assert_vec_eq(t.transform_point(Vec3::ZERO), Vec3::new(10.0, 0.0, -2.0));
        assert_vec_eq(t.transform_vector(Vec3::UP), Vec3::UP);
    }

    #[test]
    fn from_axes_places_vectors_in_columns() {
        let m = Mat4::from_axes(Vec3::UP, Vec3::RIGHT, Vec3::FORWARD);
        assert_eq!(m.column(0), Vec3::UP);
        assert_eq!(m.column(1), Vec3::RIGHT);
        assert_eq!(m.column(2), Vec3::FORWARD);
    }
}
