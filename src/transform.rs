//! Per-object transform state.
//!
//! An object's orientation is carried as a live orthonormal [`Basis`] that is
//! rotated a little every frame, not as accumulated Euler angles. The
//! per-frame rotation amounts are stored as deltas and applied about the
//! object's own current axes.

use crate::math::{mat4::Mat4, vec3::Vec3};
use crate::scene::ObjectId;

/// Orientation of an object: its right, up and forward directions.
///
/// Model space convention: right is +X, up is +Y, forward is -Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            right: Vec3::RIGHT,
            up: Vec3::UP,
            forward: Vec3::FORWARD,
        }
    }
}

impl Basis {
    pub fn new(right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Self { right, up, forward }
    }

    /// Reads a basis back out of a rotation (or rigid) matrix.
    pub fn from_matrix(m: &Mat4) -> Self {
        Self {
            right: m.column(0),
            up: m.column(1),
            forward: -m.column(2),
        }
    }

    /// Rotation matrix with columns `(right, up, -forward)`.
    ///
    /// The default basis produces the identity.
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_axes(self.right, self.up, -self.forward)
    }

    /// Applies one frame of rotation about this basis' own axes.
    ///
    /// `deltas` holds x = pitch (about right), y = yaw (about up) and
    /// z = roll (about forward), in radians. The three axis-angle rotations
    /// are built from the current axes and composed as `roll · yaw · pitch`.
    ///
    /// Each resulting vector is normalized on its own. Mutual orthogonality is
    /// whatever the composed rotation preserves in floating point; it is not
    /// re-enforced.
    pub fn rotated(&self, deltas: Vec3) -> Self {
        let r_roll = Mat4::axis_angle(self.forward, deltas.z);
        let r_yaw = Mat4::axis_angle(self.up, deltas.y);
        let r_pitch = Mat4::axis_angle(self.right, deltas.x);
        let r = r_roll * r_yaw * r_pitch;

        Self {
            right: r.transform_vector(self.right).normalize(),
            up: r.transform_vector(self.up).normalize(),
            forward: r.transform_vector(self.forward).normalize(),
        }
    }
}

/// Transform state of one scene object.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(0.0, 10.0, 0.0)
///     .set_rotation_xyz(0.0, 0.0, 0.2)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    name: String,
    position: Vec3,
    rotation: Vec3, // Per-frame deltas in radians: x=pitch, y=yaw, z=roll
    scale: Vec3,
    basis: Basis,
    rigid: Mat4, // Translation * Rotation of the last update, for children
    parent: Option<ObjectId>,
}

impl Transform {
    /// Create a transform at the origin with the default basis, unit scale,
    /// no rotation and no parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            basis: Basis::default(),
            rigid: Mat4::identity(),
            parent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector, in the parent's frame.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    // ============ Rotation ============

    /// Rotation applied on the next update (x=pitch, y=yaw, z=roll).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    pub fn set_rotation_xyz(&mut self, pitch: f32, yaw: f32, roll: f32) -> &mut Self {
        self.rotation = Vec3::new(pitch, yaw, roll);
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    // ============ Orientation ============

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn set_basis(&mut self, basis: Basis) -> &mut Self {
        self.basis = basis;
        self
    }

    // ============ Hierarchy ============

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ObjectId>) {
        self.parent = parent;
    }

    /// Translation * Rotation from the most recent [`Transform::update`].
    pub fn rigid_matrix(&self) -> Mat4 {
        self.rigid
    }

    // ============ Matrix Generation ============

    /// Advances the orientation by one frame and returns the local matrix.
    ///
    /// The basis is rotated by the current deltas, then
    /// `Translation * Rotation` is cached as the rigid matrix and
    /// `Translation * Rotation * Scale` is returned (scale is identity when
    /// `apply_scale` is false). Call once per frame: every call rotates.
    pub fn update(&mut self, apply_scale: bool) -> Mat4 {
        self.basis = self.basis.rotated(self.rotation);

        let translation = Mat4::translation(self.position.x, self.position.y, self.position.z);
        let rotation = self.basis.rotation_matrix();
        self.rigid = translation * rotation;

        if apply_scale {
            self.rigid * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
        } else {
            self.rigid
        }
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
    fn test_default() {
        let t = Transform::new("body");
        assert_eq!(t.name(), "body");
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.basis(), Basis::default());
        assert_eq!(t.parent(), None);
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new("wing");
        t.set_position_xyz(1.0, 2.0, 3.0)
            .set_rotation_xyz(0.0, 0.5, 0.0)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.5);
        assert_eq!(t.scale(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn default_basis_is_identity_rotation() {
        assert_eq!(Basis::default().rotation_matrix(), Mat4::identity());
    }

    #[test]
    fn unrotated_unscaled_update_is_pure_translation() {
        let mut t = Transform::new("body");
        t.set_position_xyz(4.0, -2.0, 7.5);
        assert_eq!(t.update(true), Mat4::translation(4.0, -2.0, 7.5));
        assert_eq!(t.rigid_matrix(), Mat4::translation(4.0, -2.0, 7.5));
    }

    #[test]
    fn scale_is_excluded_from_rigid_matrix() {
        let mut t = Transform::new("body");
        t.set_position_xyz(1.0, 0.0, 0.0)
            .set_scale(Vec3::new(2.0, 3.0, 4.0));
        let m = t.update(true);
        assert_relative_eq!(m.get(1, 1), 3.0);
        assert_eq!(t.rigid_matrix(), Mat4::translation(1.0, 0.0, 0.0));
        assert_eq!(t.update(false), Mat4::translation(1.0, 0.0, 0.0));
    }

    #[test]
    fn yaw_turns_forward_toward_left() {
        let basis = Basis::default().rotated(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert_vec_eq(basis.forward, Vec3::new(-1.0, 0.0, 0.0));
        assert_vec_eq(basis.right, Vec3::new(0.0, 0.0, -1.0));
        assert_vec_eq(basis.up, Vec3::UP);
    }

    #[test]
    fn pitch_raises_the_nose() {
        let basis = Basis::default().rotated(Vec3::new(0.3, 0.0, 0.0));
        assert!(basis.forward.y > 0.0);
        assert_vec_eq(basis.right, Vec3::RIGHT);
    }

    #[test]
    fn rotation_uses_current_axes() {
        // After a quarter yaw, pitching is about the new right axis (-Z).
        let yawed = Basis::default().rotated(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let pitched = yawed.rotated(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        assert_vec_eq(pitched.forward, Vec3::UP);
        assert_vec_eq(pitched.right, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn rotation_keeps_position() {
        let mut t = Transform::new("body");
        t.set_position_xyz(5.0, 6.0, 7.0).set_rotation_xyz(0.1, 0.2, 0.3);
        let m = t.update(false);
        assert_vec_eq(m.transform_point(Vec3::ZERO), Vec3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn basis_stays_unit_length_over_many_frames() {
        let mut t = Transform::new("body");
        t.set_rotation_xyz(0.031, -0.047, 0.023);
        for _ in 0..2000 {
            t.update(true);
        }
        let b = t.basis();
        assert_relative_eq!(b.right.magnitude(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(b.up.magnitude(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(b.forward.magnitude(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn orthogonality_drift_is_tracked_not_corrected() {
        // Vectors are normalized independently; orthogonality only holds to
        // the precision the composed rotations keep. Measure it stays small.
        let mut t = Transform::new("body");
        t.set_rotation_xyz(0.025, 0.025, -0.025);
        for _ in 0..500 {
            t.update(true);
        }
        let b = t.basis();
        assert!(b.right.dot(b.up).abs() < 1e-3);
        assert!(b.up.dot(b.forward).abs() < 1e-3);
        assert!(b.forward.dot(b.right).abs() < 1e-3);
    }

    #[test]
    fn basis_round_trips_through_matrix() {
        let basis = Basis::default().rotated(Vec3::new(0.2, -0.4, 0.9));
        let back = Basis::from_matrix(&basis.rotation_matrix());
        assert_vec_eq(back.right, basis.right);
        assert_vec_eq(back.up, basis.up);
        assert_vec_eq(back.forward, basis.forward);
    }
}
