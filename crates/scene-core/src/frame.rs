//! Per-frame input handed to every layer, the atom and the camera.

use crate::constants::{MAX_FRAME_DT, REFERENCE_FPS};
use crate::pointer::{PointerState, ScrollState};

/// Snapshot of time and input for one tick.
///
/// All oscillating terms read `elapsed`, never a frame counter, so the scene
/// looks the same at any refresh rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the scene was mounted.
    pub elapsed: f32,
    /// Seconds since the previous tick, clamped to `[0, MAX_FRAME_DT]`.
    pub dt: f32,
    pub pointer: PointerState,
    pub scroll: ScrollState,
}

impl FrameInput {
    pub fn new(elapsed: f32, dt: f32, pointer: PointerState, scroll: ScrollState) -> Self {
        Self {
            elapsed,
            dt: sanitize_dt(dt),
            pointer,
            scroll,
        }
    }

    /// Convenience for tests and tools: a frame at `elapsed` with a nominal
    /// 60 Hz step and the given pointer.
    pub fn at(elapsed: f32, pointer: PointerState) -> Self {
        let dt = 1.0 / REFERENCE_FPS;
        Self::new(elapsed, dt, pointer, ScrollState::default())
    }

    /// Integration step in reference ticks (1.0 at 60 Hz).
    #[inline]
    pub fn step(&self) -> f32 {
        self.dt * REFERENCE_FPS
    }

    /// Per-tick smoothing factor `alpha` stretched over this frame's step, so
    /// exponential followers converge at the same speed at any refresh rate
    /// and stand still when `dt` is 0.
    #[inline]
    pub fn blend(&self, alpha: f32) -> f32 {
        1.0 - (1.0 - alpha).powf(self.step())
    }
}

#[inline]
pub(crate) fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}
