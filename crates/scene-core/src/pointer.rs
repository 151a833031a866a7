//! Pointer and scroll input shared read-only by every layer and the camera.
//!
//! Input handlers write raw samples into a [`PointerInbox`] whenever they fire
//! (last value wins). Once per frame the coordinator calls
//! [`PointerInputTracker::tick`], which turns the latest sample into a smoothed
//! position and a frame-to-frame velocity.

use crate::config::PointerParams;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Smoothed pointer state for one frame.
///
/// `raw_*` are in `[0, 1]` with screen orientation (x right, y down).
/// `smoothed_*` and `velocity_*` are in centered, y-up units where the
/// viewport spans `[-1, 1]` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub raw_x: f32,
    pub raw_y: f32,
    pub smoothed_x: f32,
    pub smoothed_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// False until the first valid pointer sample arrives.
    pub active: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            raw_x: 0.5,
            raw_y: 0.5,
            smoothed_x: 0.0,
            smoothed_y: 0.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            active: false,
        }
    }
}

impl PointerState {
    /// Raw sample re-centered to `[-1, 1]`, y up.
    #[inline]
    pub fn centered_target(&self) -> (f32, f32) {
        center(self.raw_x, self.raw_y)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        (self.velocity_x * self.velocity_x + self.velocity_y * self.velocity_y).sqrt()
    }
}

/// Normalized document scroll progress in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub progress: f32,
}

#[inline]
fn center(raw_x: f32, raw_y: f32) -> (f32, f32) {
    (raw_x * 2.0 - 1.0, 1.0 - raw_y * 2.0)
}

/// Last-value-wins register for samples produced outside the frame loop.
///
/// Each float is stored as its bit pattern in an `AtomicU32`, so a reader can
/// never observe a torn value. Fields are independent; x and y of one sample
/// may be read across two writes, which is visually irrelevant.
#[derive(Debug)]
pub struct PointerInbox {
    x: AtomicU32,
    y: AtomicU32,
    scroll: AtomicU32,
    has_pointer: AtomicBool,
}

impl Default for PointerInbox {
    fn default() -> Self {
        Self {
            x: AtomicU32::new(0.5f32.to_bits()),
            y: AtomicU32::new(0.5f32.to_bits()),
            scroll: AtomicU32::new(0.0f32.to_bits()),
            has_pointer: AtomicBool::new(false),
        }
    }
}

impl PointerInbox {
    /// Store a normalized pointer sample. Non-finite samples are dropped so a
    /// single bad event cannot poison positions that persist across frames.
    pub fn ingest_pointer(&self, raw_x: f32, raw_y: f32) {
        if !raw_x.is_finite() || !raw_y.is_finite() {
            log::trace!("[pointer] dropped non-finite sample ({raw_x}, {raw_y})");
            return;
        }
        let (x, y) = (raw_x.clamp(0.0, 1.0), raw_y.clamp(0.0, 1.0));
        self.x.store(x.to_bits(), Ordering::Relaxed);
        self.y.store(y.to_bits(), Ordering::Relaxed);
        self.has_pointer.store(true, Ordering::Release);
    }

    pub fn ingest_scroll(&self, progress: f32) {
        if !progress.is_finite() {
            log::trace!("[pointer] dropped non-finite scroll {progress}");
            return;
        }
        let progress = progress.clamp(0.0, 1.0);
        self.scroll.store(progress.to_bits(), Ordering::Relaxed);
    }

    fn load(&self) -> (f32, f32, f32, bool) {
        let active = self.has_pointer.load(Ordering::Acquire);
        (
            f32::from_bits(self.x.load(Ordering::Relaxed)),
            f32::from_bits(self.y.load(Ordering::Relaxed)),
            f32::from_bits(self.scroll.load(Ordering::Relaxed)),
            active,
        )
    }
}

/// Exponentially smoothed pointer plus backward-difference velocity.
#[derive(Debug)]
pub struct PointerInputTracker {
    inbox: Arc<PointerInbox>,
    params: PointerParams,
    state: PointerState,
    scroll: ScrollState,
    prev_target: (f32, f32),
}

impl Default for PointerInputTracker {
    fn default() -> Self {
        Self::new(PointerParams::default())
    }
}

impl PointerInputTracker {
    pub fn new(params: PointerParams) -> Self {
        Self {
            inbox: Arc::new(PointerInbox::default()),
            params,
            state: PointerState::default(),
            scroll: ScrollState::default(),
            prev_target: (0.0, 0.0),
        }
    }

    /// Handle for producers running outside the frame loop.
    pub fn inbox(&self) -> Arc<PointerInbox> {
        Arc::clone(&self.inbox)
    }

    #[inline]
    pub fn ingest_pointer(&self, raw_x: f32, raw_y: f32) {
        self.inbox.ingest_pointer(raw_x, raw_y);
    }

    #[inline]
    pub fn ingest_scroll(&self, progress: f32) {
        self.inbox.ingest_scroll(progress);
    }

    /// Advance one frame. Must run before any layer reads [`Self::state`].
    ///
    /// With no new samples since the previous call, velocity becomes zero and
    /// the smoothed position only continues its exponential approach.
    pub fn tick(&mut self) {
        let (raw_x, raw_y, scroll, active) = self.inbox.load();
        let (tx, ty) = center(raw_x, raw_y);
        let alpha = self.params.smoothing;
        let scale = self.params.velocity_scale;

        let s = &mut self.state;
        if active && !s.active {
            // first sample: no jump from the default center
            self.prev_target = (tx, ty);
        }
        s.raw_x = raw_x;
        s.raw_y = raw_y;
        s.active = active;
        s.velocity_x = (tx - self.prev_target.0) * scale;
        s.velocity_y = (ty - self.prev_target.1) * scale;
        self.prev_target = (tx, ty);
        s.smoothed_x += (tx - s.smoothed_x) * alpha;
        s.smoothed_y += (ty - s.smoothed_y) * alpha;

        self.scroll.progress = scroll;
    }

    #[inline]
    pub fn state(&self) -> PointerState {
        self.state
    }

    #[inline]
    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }
}

/// Convert a pointer position in pixels to normalized `[0, 1]` coordinates.
///
/// An empty or invalid viewport maps to the center.
#[inline]
pub fn normalize_pointer_px(px: f32, py: f32, width: f32, height: f32) -> (f32, f32) {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) && px.is_finite() && py.is_finite() {
        ((px / width).clamp(0.0, 1.0), (py / height).clamp(0.0, 1.0))
    } else {
        (0.5, 0.5)
    }
}

/// Scroll position normalized by the scrollable height; 0 when the content
/// fits inside the viewport.
#[inline]
pub fn scroll_progress(scroll_top: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    let scrollable = scroll_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}
