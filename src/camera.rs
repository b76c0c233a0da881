//! Scene camera with three selectable modes.
//!
//! - **Rooted**: fixed position/view/up from the scene parameters. Applied
//!   only when the mode is selected, never per frame.
//! - **First-person**: sits on the anchor object and looks along its forward
//!   axis.
//! - **Third-person**: trails the anchor by `distance`, raised by `height`,
//!   looking back at it.
//!
//! Whatever the mode, [`Camera::world_to_camera`] builds the view matrix from
//! the current position/view/up triple.

use std::fmt;

use log::{debug, info};

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::scene::{ObjectId, Scene, SceneParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Rooted,
    FirstPerson,
    ThirdPerson,
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraMode::Rooted => write!(f, "Rooted"),
            CameraMode::FirstPerson => write!(f, "FirstPerson"),
            CameraMode::ThirdPerson => write!(f, "ThirdPerson"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    mode: CameraMode,
    position: Vec3,
    view: Vec3,
    up: Vec3,
    right: Vec3, // Derived: view x up
    distance: f32,
    height: f32,
}

impl Camera {
    /// Creates a rooted camera from the scene parameters.
    pub fn new(params: &SceneParams) -> Self {
        let mut camera = Self {
            mode: CameraMode::Rooted,
            position: Vec3::ZERO,
            view: Vec3::FORWARD,
            up: Vec3::UP,
            right: Vec3::RIGHT,
            distance: params.distance.max(0.0),
            height: params.height.max(0.0),
        };
        camera.apply_rooted(params);
        camera
    }

    fn set_frame(&mut self, position: Vec3, view: Vec3, up: Vec3) {
        self.position = position;
        self.view = view;
        self.up = up;
        self.right = view.cross(up).normalize();
    }

    fn apply_rooted(&mut self, params: &SceneParams) {
        self.set_frame(params.camera_position, params.camera_view, params.camera_up);
    }

    // =========================================================================
    // Mode
    // =========================================================================

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Switches mode. Selecting rooted (even again) re-applies the scene's
    /// camera, which is the only time a rooted camera changes.
    pub fn select_mode(&mut self, mode: CameraMode, params: &SceneParams) {
        if mode != self.mode {
            info!("camera mode: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        if mode == CameraMode::Rooted {
            self.apply_rooted(params);
        }
    }

    /// Recomputes the camera from the anchor's world frame.
    ///
    /// Rooted cameras are left alone. In the anchored modes a missing anchor
    /// leaves the camera where it was.
    pub fn update(&mut self, scene: &Scene, anchor: Option<ObjectId>) {
        if self.mode == CameraMode::Rooted {
            return;
        }
        let Some((anchor_pos, basis)) = anchor.and_then(|id| scene.world_frame(id)) else {
            debug!("{} camera has no anchor; keeping previous frame", self.mode);
            return;
        };

        match self.mode {
            CameraMode::Rooted => {}
            CameraMode::FirstPerson => {
                self.set_frame(anchor_pos, basis.forward, basis.up);
            }
            CameraMode::ThirdPerson => {
                let position = anchor_pos - basis.forward * self.distance + basis.up * self.height;
                let view = (anchor_pos - position).normalize();
                let up = basis.right.cross(view);
                self.set_frame(position, view, up);
            }
        }
    }

    // =========================================================================
    // Trail adjustment
    // =========================================================================

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Changes the third-person trail distance, never below zero.
    pub fn adjust_distance(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(0.0);
    }

    /// Changes the third-person height, never below zero.
    pub fn adjust_height(&mut self, delta: f32) {
        self.height = (self.height + delta).max(0.0);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view(&self) -> Vec3 {
        self.view
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// World-to-camera matrix for the current position/view/up.
    ///
    /// With `w = normalize(-view)`, `v = normalize(up)` and `u = w x v`, the
    /// rows are `(-u, v, w)` and the translation column is
    /// `(u.P, -v.P, -w.P)` for camera position `P`. Rotation and translation
    /// to the origin happen in the one matrix.
    pub fn world_to_camera(&self) -> Mat4 {
        let w = (-self.view).normalize();
        let v = self.up.normalize();
        let u = w.cross(v);
        let p = self.position;

        Mat4::new([
            [-u.x, -u.y, -u.z, u.dot(p)],
            [v.x, v.y, v.z, -v.dot(p)],
            [w.x, w.y, w.z, -w.dot(p)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}
