// Host-side tests for pointer smoothing, velocity and input guards.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use scene_core::*;
use std::thread;

#[test]
fn smoothing_reaches_corner_within_sixty_ticks() {
    let mut tracker = PointerInputTracker::default();
    // raw (1, 0) is the top-right corner: centered (1, 1)
    tracker.ingest_pointer(1.0, 0.0);

    let mut prev = tracker.state();
    for _ in 0..60 {
        tracker.tick();
        let s = tracker.state();
        assert!(s.smoothed_x >= prev.smoothed_x && s.smoothed_x <= 1.0);
        assert!(s.smoothed_y >= prev.smoothed_y && s.smoothed_y <= 1.0);
        prev = s;
    }
    let s = tracker.state();
    assert!((1.0 - s.smoothed_x).abs() < 0.05, "x {}", s.smoothed_x);
    assert!((1.0 - s.smoothed_y).abs() < 0.05, "y {}", s.smoothed_y);
}

#[test]
fn default_state_is_centered_and_inactive() {
    let tracker = PointerInputTracker::default();
    let s = tracker.state();
    assert!(!s.active);
    assert_eq!(s.centered_target(), (0.0, 0.0));
    assert_eq!(s.speed(), 0.0);
}

#[test]
fn first_sample_does_not_spike_velocity() {
    let mut tracker = PointerInputTracker::default();
    tracker.ingest_pointer(0.9, 0.1);
    tracker.tick();
    let s = tracker.state();
    assert!(s.active);
    assert_eq!(s.velocity_x, 0.0);
    assert_eq!(s.velocity_y, 0.0);
}

#[test]
fn velocity_is_scaled_frame_delta() {
    let mut tracker = PointerInputTracker::default();
    tracker.ingest_pointer(0.5, 0.5);
    tracker.tick();
    tracker.ingest_pointer(0.6, 0.5);
    tracker.tick();
    let s = tracker.state();
    // centered delta 0.2, halved
    assert_abs_diff_eq!(s.velocity_x, 0.1, epsilon = 1e-5);
    assert_abs_diff_eq!(s.velocity_y, 0.0, epsilon = 1e-6);

    // no new sample: the pointer is at rest
    tracker.tick();
    assert_eq!(tracker.state().velocity_x, 0.0);
}

#[test]
fn screen_down_is_world_down() {
    let mut tracker = PointerInputTracker::default();
    tracker.ingest_pointer(0.5, 1.0);
    tracker.tick();
    assert_eq!(tracker.state().centered_target(), (0.0, -1.0));
    assert!(tracker.state().smoothed_y < 0.0);
}

#[test]
fn non_finite_samples_are_dropped() {
    let mut tracker = PointerInputTracker::default();
    tracker.ingest_pointer(f32::NAN, 0.2);
    tracker.tick();
    assert!(!tracker.state().active);

    tracker.ingest_pointer(0.25, 0.75);
    tracker.tick();
    tracker.ingest_pointer(0.3, f32::INFINITY);
    tracker.ingest_scroll(f32::NAN);
    tracker.tick();
    let s = tracker.state();
    assert_eq!(s.raw_x, 0.25);
    assert_eq!(s.raw_y, 0.75);
    assert!(s.smoothed_x.is_finite() && s.smoothed_y.is_finite());
    assert_eq!(tracker.scroll().progress, 0.0);
}

#[test]
fn samples_are_clamped_to_unit_square() {
    let mut tracker = PointerInputTracker::default();
    tracker.ingest_pointer(2.0, -1.0);
    tracker.ingest_scroll(3.5);
    tracker.tick();
    let s = tracker.state();
    assert_eq!((s.raw_x, s.raw_y), (1.0, 0.0));
    assert_eq!(tracker.scroll().progress, 1.0);
}

#[test]
fn last_sample_wins() {
    let mut tracker = PointerInputTracker::default();
    tracker.ingest_pointer(0.1, 0.1);
    tracker.ingest_pointer(0.2, 0.2);
    tracker.ingest_pointer(0.7, 0.4);
    tracker.tick();
    let s = tracker.state();
    assert_eq!((s.raw_x, s.raw_y), (0.7, 0.4));
}

#[test]
fn inbox_accepts_samples_from_another_thread() {
    let mut tracker = PointerInputTracker::default();
    let inbox = tracker.inbox();
    thread::spawn(move || {
        inbox.ingest_pointer(0.8, 0.2);
        inbox.ingest_scroll(0.5);
    })
    .join()
    .unwrap();
    tracker.tick();
    assert!(tracker.state().active);
    assert_eq!(tracker.state().raw_x, 0.8);
    assert_eq!(tracker.scroll().progress, 0.5);
}

#[test]
fn pixel_normalization() {
    assert_eq!(normalize_pointer_px(50.0, 25.0, 100.0, 100.0), (0.5, 0.25));
    assert_eq!(normalize_pointer_px(500.0, -5.0, 100.0, 100.0), (1.0, 0.0));
    assert_eq!(normalize_pointer_px(10.0, 10.0, 0.0, 100.0), (0.5, 0.5));
    let nan = normalize_pointer_px(f32::NAN, 10.0, 100.0, 100.0);
    assert_eq!(nan, (0.5, 0.5));
}

#[test]
fn scroll_progress_normalization() {
    assert_eq!(scroll_progress(250.0, 1500.0, 500.0), 0.25);
    assert_eq!(scroll_progress(100.0, 400.0, 500.0), 0.0);
    assert_eq!(scroll_progress(5000.0, 1500.0, 500.0), 1.0);
    assert_eq!(scroll_progress(f32::NAN, 1500.0, 500.0), 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_float_input_keeps_state_in_range(
        samples in prop::collection::vec(any::<(f32, f32, f32)>(), 1..20)
    ) {
        let mut tracker = PointerInputTracker::default();
        for (x, y, scroll) in samples {
            tracker.ingest_pointer(x, y);
            tracker.ingest_scroll(scroll);
            tracker.tick();
            let s = tracker.state();
            prop_assert!((0.0..=1.0).contains(&s.raw_x));
            prop_assert!((0.0..=1.0).contains(&s.raw_y));
            prop_assert!(s.smoothed_x.is_finite() && s.smoothed_y.is_finite());
            prop_assert!(s.speed().is_finite());
            prop_assert!((0.0..=1.0).contains(&tracker.scroll().progress));
        }
    }
}
