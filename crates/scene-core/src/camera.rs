//! Camera that drifts on two slow, unrelated frequencies and leans toward the
//! pointer. Everything eases in; nothing snaps.

use crate::config::CameraParams;
use crate::frame::FrameInput;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub look_target: Vec3,
    pub base_position: Vec3,
}

pub struct CameraController {
    params: CameraParams,
    state: CameraState,
}

impl CameraController {
    pub fn new(params: CameraParams) -> Self {
        Self {
            params,
            state: CameraState {
                position: params.base_position,
                look_target: params.base_look_target,
                base_position: params.base_position,
            },
        }
    }

    /// Where the camera is heading this frame, before smoothing.
    pub fn target_position(&self, frame: &FrameInput) -> Vec3 {
        let prm = &self.params;
        let t = frame.elapsed;
        let drift = Vec3::new(
            (t * prm.drift_omega.x).sin() * prm.drift_amp.x,
            (t * prm.drift_omega.y).cos() * prm.drift_amp.y,
            0.0,
        );
        let lean = smoothed_pointer(frame) * prm.parallax_gain;
        let scroll = frame.scroll.progress;
        prm.base_position
            + drift
            + lean
            + Vec3::new(0.0, -scroll * prm.scroll_lift, scroll * prm.scroll_dolly)
    }

    pub fn target_look(&self, frame: &FrameInput) -> Vec3 {
        let prm = &self.params;
        let lean = smoothed_pointer(frame) * prm.look_gain;
        prm.base_look_target + lean - Vec3::Y * frame.scroll.progress * prm.scroll_lift
    }

    pub fn update(&mut self, frame: &FrameInput) {
        let alpha = frame.blend(self.params.smoothing);
        let position = self.target_position(frame);
        let look = self.target_look(frame);
        self.state.position += (position - self.state.position) * alpha;
        self.state.look_target += (look - self.state.look_target) * alpha;
    }

    #[inline]
    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn params(&self) -> &CameraParams {
        &self.params
    }

    /// Right-handed view matrix, +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.state.position, self.state.look_target, Vec3::Y)
    }
}

#[inline]
fn smoothed_pointer(frame: &FrameInput) -> Vec3 {
    Vec3::new(frame.pointer.smoothed_x, frame.pointer.smoothed_y, 0.0)
}
