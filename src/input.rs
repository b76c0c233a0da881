//! Per-frame input snapshot and control tuning.
//!
//! Input is level-triggered: the window samples which keys are held once per
//! frame, so holding a key applies its effect every frame.

use crate::camera::CameraMode;
use crate::engine::DrawMode;
use crate::math::vec3::Vec3;

/// Actions held down during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub roll_left: bool,
    pub roll_right: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub thrust: bool,
    pub draw_mode: Option<DrawMode>,
    pub camera_mode: Option<CameraMode>,
    pub distance_closer: bool,
    pub distance_farther: bool,
    pub height_lower: bool,
    pub height_higher: bool,
}

/// +1, -1 or 0 for a pair of opposing keys.
fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

impl InputState {
    /// Rotation deltas for this frame (x=pitch, y=yaw, z=roll), `step`
    /// radians per held key. Zero on every axis with no key held.
    pub fn rotation_deltas(&self, step: f32) -> Vec3 {
        Vec3::new(
            axis(self.pitch_up, self.pitch_down) * step,
            axis(self.yaw_left, self.yaw_right) * step,
            axis(self.roll_right, self.roll_left) * step,
        )
    }

    /// Signed change to the third-person trail distance.
    pub fn distance_delta(&self, step: f32) -> f32 {
        axis(self.distance_farther, self.distance_closer) * step
    }

    /// Signed change to the third-person height.
    pub fn height_delta(&self, step: f32) -> f32 {
        axis(self.height_higher, self.height_lower) * step
    }
}

/// Control rates, all per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Radians of pitch/yaw/roll per frame a key is held.
    pub rotation_step: f32,
    /// Units moved along the anchor's forward axis per frame of thrust.
    pub thrust_speed: f32,
    /// Units the trail distance or height changes per frame.
    pub camera_step: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            rotation_step: 0.025,
            thrust_speed: 5.0,
            camera_step: 10.0,
        }
    }
}
