// Host-side tests for the force-directed mote swarm.

use approx::assert_abs_diff_eq;
use glam::Vec3;
use proptest::prelude::*;
use scene_core::*;

/// Pointer held at the view center (world origin on the mote plane).
fn centered_pointer(velocity_x: f32) -> PointerState {
    PointerState {
        raw_x: 0.5,
        raw_y: 0.5,
        velocity_x,
        active: true,
        ..PointerState::default()
    }
}

fn place(layer: &mut ForceMotesLayer, index: usize, position: Vec3) {
    let p = &mut layer.particles_mut()[index];
    p.position = position;
    p.velocity = Vec3::ZERO;
}

/// Velocity of particle 0 after one tick with `pointer`, minus the velocity it
/// gets from the spring and ambient terms alone.
fn kinematics(layer: &ForceMotesLayer) -> Vec<(Vec3, Vec3)> {
    layer
        .particles()
        .iter()
        .map(|p| (p.position, p.velocity))
        .collect()
}

fn pointer_contribution(position: Vec3, pointer: PointerState) -> Vec3 {
    let mut pulled = ForceMotesLayer::new(MotesParams::default(), 4);
    let mut free = ForceMotesLayer::new(MotesParams::default(), 4);
    place(&mut pulled, 0, position);
    place(&mut free, 0, position);
    pulled.update(&FrameInput::at(0.0, pointer));
    free.update(&FrameInput::at(0.0, PointerState::default()));
    pulled.particles()[0].velocity - free.particles()[0].velocity
}

#[test]
fn displaced_swarm_settles_back_without_pointer() {
    let mut motes = ForceMotesLayer::new(MotesParams::default(), 3);
    for p in motes.particles_mut() {
        p.position += Vec3::new(1.0, -0.5, 0.3);
    }
    assert!(motes.max_displacement() > 1.0);

    for i in 0..1_500 {
        motes.update(&FrameInput::at(i as f32 / 60.0, PointerState::default()));
    }
    let max = motes.max_displacement();
    assert!(max < 0.02, "max {max}");
    for p in motes.particles() {
        assert!(p.position.is_finite());
    }
}

#[test]
fn zero_dt_frame_leaves_the_swarm_still() {
    let mut motes = ForceMotesLayer::new(MotesParams::default(), 3);
    for i in 0..30 {
        motes.update(&FrameInput::at(i as f32 / 60.0, centered_pointer(0.05)));
    }
    let before = kinematics(&motes);
    let pointer_before = motes.pointer_world();

    let mut moved = centered_pointer(0.05);
    moved.raw_x = 0.9;
    motes.update(&FrameInput::new(0.2, 0.0, moved, ScrollState::default()));

    assert_eq!(kinematics(&motes), before);
    assert_eq!(motes.pointer_world(), pointer_before);
}

#[test]
fn settling_speed_does_not_depend_on_refresh_rate() {
    let settle = |hz: f32| {
        let mut motes = ForceMotesLayer::new(MotesParams::default(), 11);
        for p in motes.particles_mut() {
            p.position += Vec3::new(1.0, 0.0, 0.0);
            p.velocity = Vec3::ZERO;
        }
        let idle = PointerState::default();
        let frames = (hz * 0.5) as usize;
        for i in 1..=frames {
            let t = i as f32 / hz;
            let frame = FrameInput::new(t, 1.0 / hz, idle, ScrollState::default());
            motes.update(&frame);
        }
        motes.mean_displacement()
    };
    let at_60 = settle(60.0);
    let at_120 = settle(120.0);
    assert!(at_60 < 0.9, "swarm did not move: {at_60}");
    assert_abs_diff_eq!(at_60, at_120, epsilon = 0.1);
}

#[test]
fn pointer_attracts_within_influence_radius() {
    let d = pointer_contribution(Vec3::new(1.0, 0.0, 0.0), centered_pointer(0.0));
    let prm = MotesParams::default();
    let falloff = (prm.influence_radius - 1.0) / prm.influence_radius;
    let expected = -falloff * prm.attraction * prm.damping;
    assert_abs_diff_eq!(d.x, expected, epsilon = 1e-6);
    assert_abs_diff_eq!(d.y, 0.0, epsilon = 1e-6);
}

#[test]
fn pointer_is_ignored_outside_influence_radius() {
    let d = pointer_contribution(Vec3::new(3.0, 0.0, 0.0), centered_pointer(0.0));
    assert_eq!(d, Vec3::ZERO);
}

#[test]
fn close_motes_swirl_around_the_pointer() {
    let d = pointer_contribution(Vec3::new(0.5, 0.0, 0.0), centered_pointer(0.0));
    // direction to pointer is -x; the swirl is its left-hand perpendicular
    assert!(d.x < 0.0);
    assert!(d.y < 0.0);
    let prm = MotesParams::default();
    assert_abs_diff_eq!(d.y, -prm.orbit_speed * prm.damping, epsilon = 1e-6);
}

#[test]
fn mote_on_top_of_pointer_gets_no_force() {
    let d = pointer_contribution(Vec3::ZERO, centered_pointer(0.0));
    assert_eq!(d, Vec3::ZERO);
}

#[test]
fn fast_pointer_flings_nearby_motes() {
    let d = pointer_contribution(Vec3::new(1.0, 0.0, 0.0), centered_pointer(0.05));
    let prm = MotesParams::default();
    let fling = 0.05 * prm.world_extent.x * prm.release_gain * prm.damping;
    assert!(d.x > fling * 0.9, "{}", d.x);
}

#[test]
fn release_cooldown_blocks_repeated_flings() {
    let cooled = MotesParams::default();
    let uncooled = MotesParams {
        release_cooldown_ticks: 0,
        ..MotesParams::default()
    };
    let mut a = ForceMotesLayer::new(cooled, 4);
    let mut b = ForceMotesLayer::new(uncooled, 4);
    place(&mut a, 0, Vec3::new(1.0, 0.0, 0.0));
    place(&mut b, 0, Vec3::new(1.0, 0.0, 0.0));
    for i in 0..2 {
        let frame = FrameInput::at(i as f32 / 60.0, centered_pointer(0.05));
        a.update(&frame);
        b.update(&frame);
    }
    let extra = b.particles()[0].velocity.x - a.particles()[0].velocity.x;
    assert!(extra > 0.05, "extra {extra}");
}

#[test]
fn pointer_world_snaps_then_smooths() {
    let mut motes = ForceMotesLayer::new(MotesParams::default(), 4);
    let ext = motes.params().world_extent;
    let mut pointer = PointerState {
        raw_x: 1.0,
        raw_y: 0.5,
        active: true,
        ..PointerState::default()
    };
    motes.update(&FrameInput::at(0.0, pointer));
    assert_abs_diff_eq!(motes.pointer_world().x, ext.x);

    pointer.raw_x = 0.5;
    motes.update(&FrameInput::at(1.0 / 60.0, pointer));
    let alpha = motes.params().pointer_alpha;
    let expected = ext.x * (1.0 - alpha);
    assert_abs_diff_eq!(motes.pointer_world().x, expected, epsilon = 1e-5);
}

#[test]
fn opacity_stays_in_range_near_pointer() {
    let mut motes = ForceMotesLayer::new(MotesParams::default(), 9);
    for i in 0..200 {
        motes.update(&FrameInput::at(i as f32 / 60.0, centered_pointer(0.0)));
        for p in motes.particles() {
            assert!((0.0..=1.0).contains(&p.opacity));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn spring_return_never_diverges(
        dx in -5.0f32..5.0,
        dy in -5.0f32..5.0,
        dz in -2.0f32..2.0,
    ) {
        let mut motes = ForceMotesLayer::new(MotesParams::default(), 21);
        let kick = Vec3::new(dx, dy, dz);
        for p in motes.particles_mut() {
            p.position += kick;
        }
        for i in 0..600 {
            motes.update(&FrameInput::at(i as f32 / 60.0, PointerState::default()));
            prop_assert!(motes.max_displacement() <= kick.length() + 0.05);
        }
        prop_assert!(motes.max_displacement() < 0.05 * kick.length() + 0.01);
    }
}
