// Host-side tests for the ambient particle layers.

use approx::assert_abs_diff_eq;
use scene_core::*;
use std::f32::consts::PI;

fn idle(t: f32) -> FrameInput {
    FrameInput::at(t, PointerState::default())
}

fn leaning(t: f32, smoothed_x: f32, smoothed_y: f32) -> FrameInput {
    let pointer = PointerState {
        smoothed_x,
        smoothed_y,
        active: true,
        ..PointerState::default()
    };
    FrameInput::at(t, pointer)
}

#[test]
fn fog_phase_zero_particle_repeats_every_half_period() {
    let mut fog = DriftFogLayer::new(FogParams::default(), 42);
    let initial = fog.particles()[0].base_position();
    fog.particles_mut()[0].phase = 0.0;

    fog.update(&idle(0.0));
    assert_eq!(fog.particles()[0].position, initial);

    let half_period = PI / fog.params().omega;
    let drift = fog.drift_offset(half_period, 0.0);
    assert_abs_diff_eq!(drift.length(), 0.0, epsilon = 1e-5);

    fog.update(&idle(half_period));
    let p = fog.particles()[0].position;
    assert_abs_diff_eq!(p.x, initial.x, epsilon = 1e-5);
    assert_abs_diff_eq!(p.y, initial.y, epsilon = 1e-5);
    assert_abs_diff_eq!(p.z, initial.z, epsilon = 1e-5);
}

#[test]
fn fog_moves_between_half_periods() {
    let mut fog = DriftFogLayer::new(FogParams::default(), 42);
    fog.particles_mut()[0].phase = 0.0;
    let quarter = PI / (2.0 * fog.params().omega);
    fog.update(&idle(quarter));
    assert!(fog.particles()[0].displacement() > 0.1);
}

#[test]
fn fog_fades_with_scroll() {
    let mut fog = DriftFogLayer::new(FogParams::default(), 3);
    fog.update(&idle(1.0));
    let clear: Vec<f32> = fog.particles().iter().map(|p| p.opacity).collect();

    let bottom = ScrollState { progress: 1.0 };
    let scrolled = FrameInput::new(1.0, 1.0 / 60.0, PointerState::default(), bottom);
    fog.update(&scrolled);
    for (p, before) in fog.particles().iter().zip(&clear) {
        assert_abs_diff_eq!(p.opacity, before * 0.5, epsilon = 1e-6);
    }
}

#[test]
fn moved_particles_keep_their_base_position() {
    let mut fog = DriftFogLayer::new(FogParams::default(), 42);
    let base = fog.particles()[0].base_position();
    fog.particles_mut()[0].position = glam::Vec3::splat(99.0);
    fog.update(&idle(0.4));
    let p = fog.particles()[0];
    assert_eq!(p.base_position(), base);
    let drifted = p.displacement();
    assert!(drifted < 1.0, "fog particle drifted {drifted}");
}

#[test]
fn layers_are_deterministic_per_seed() {
    assert_eq!(
        DriftFogLayer::new(FogParams::default(), 42).particles(),
        DriftFogLayer::new(FogParams::default(), 42).particles()
    );
    assert_eq!(
        WrappingDustLayer::new(DustParams::default(), 42).particles(),
        WrappingDustLayer::new(DustParams::default(), 42).particles()
    );
    assert_ne!(
        PulsingBokehLayer::new(BokehParams::default(), 1).particles(),
        PulsingBokehLayer::new(BokehParams::default(), 2).particles()
    );
}

#[test]
fn huge_seeds_do_not_collapse_a_layer() {
    for seed in [1u64 << 60, u64::MAX] {
        let fog = DriftFogLayer::new(FogParams::default(), seed);
        let bases: Vec<[u32; 3]> = fog
            .particles()
            .iter()
            .map(|p| p.base_position().to_array().map(f32::to_bits))
            .collect();
        let mut unique = bases.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), bases.len(), "seed {seed}");
    }
}

#[test]
fn dust_wraps_to_the_opposite_edge() {
    let mut dust = WrappingDustLayer::new(DustParams::default(), 7);
    let b = dust.bounds();
    dust.particles_mut()[0].position.x = b.x + 0.01;
    dust.particles_mut()[1].position.x = -b.x - 0.01;
    dust.particles_mut()[2].position.y = b.y + 0.01;
    dust.particles_mut()[3].position.x = b.x - 0.5;

    dust.update(&idle(0.0));
    let p = dust.particles();
    assert_eq!(p[0].position.x, -b.x);
    assert_eq!(p[1].position.x, b.x);
    assert_eq!(p[2].position.y, -b.y);
    // inside the box: moved, not clamped or wrapped
    assert!(p[3].position.x > b.x - 0.51 && p[3].position.x < b.x);
}

#[test]
fn wrap_axis_leaves_interior_values_alone() {
    assert_eq!(layers::dust::wrap_axis(0.3, 1.0), 0.3);
    assert_eq!(layers::dust::wrap_axis(1.0, 1.0), 1.0);
    assert_eq!(layers::dust::wrap_axis(1.2, 1.0), -1.0);
    assert_eq!(layers::dust::wrap_axis(-1.2, 1.0), 1.0);
}

#[test]
fn dust_stays_in_its_box() {
    let mut dust = WrappingDustLayer::new(DustParams::default(), 11);
    let b = dust.bounds();
    for i in 0..120 {
        dust.update(&idle(i as f32 / 60.0));
    }
    for p in dust.particles() {
        assert!(p.position.abs().cmple(b).all(), "{:?}", p.position);
    }
}

#[test]
fn bokeh_edges_read_brighter() {
    let bokeh = PulsingBokehLayer::new(BokehParams::default(), 5);
    let b = bokeh.params().bounds;
    assert_eq!(bokeh.edge_factor(0.0), 0.0);
    assert_eq!(bokeh.edge_factor(b.x), 1.0);
    assert_eq!(bokeh.edge_factor(-2.0 * b.x), 1.0);
}

#[test]
fn bokeh_pulse_stays_bounded() {
    let mut bokeh = PulsingBokehLayer::new(BokehParams::default(), 5);
    let amp = bokeh.params().pulse_amp;
    for i in 0..300 {
        bokeh.update(&idle(i as f32 * 0.1));
        for p in bokeh.particles() {
            assert!(p.scale >= p.size * (1.0 - amp) - 1e-6);
            assert!(p.scale <= p.size * (1.0 + amp) + 1e-6);
            assert!((0.0..=1.0).contains(&p.opacity));
        }
    }
}

#[test]
fn close_bokeh_keeps_the_center_clear() {
    let close = CloseBokehLayer::new(CloseBokehParams::default(), 5);
    let r = close.params().max_radius;
    assert_abs_diff_eq!(close.center_weight(glam::Vec3::ZERO), 0.35);
    assert_abs_diff_eq!(close.center_weight(glam::Vec3::new(r, 0.0, 4.0)), 1.0);
    assert_abs_diff_eq!(close.center_weight(glam::Vec3::new(3.0 * r, 0.0, 4.0)), 1.0);
}

#[test]
fn parallax_follows_smoothed_pointer() {
    let mut close = CloseBokehLayer::new(CloseBokehParams::default(), 5);
    let mut fog = DriftFogLayer::new(FogParams::default(), 5);
    let frame = leaning(0.0, 0.5, -0.5);
    close.update(&frame);
    fog.update(&frame);
    assert_abs_diff_eq!(close.group().offset.x, 0.5);
    assert_abs_diff_eq!(close.group().offset.y, -0.5);
    // foreground moves more than background
    assert!(close.group().offset.x > fog.group().offset.x);
}

#[test]
fn rays_sway_around_their_rest_angle() {
    let mut rays = BreathingRaysLayer::new(RaysParams::default(), 8);
    let sway = RaysParams::default().sway;
    for i in 0..400 {
        rays.update(&idle(i as f32 * 0.05));
        for (j, p) in rays.particles().iter().enumerate() {
            let rest = rays.rest_rotation(j).unwrap();
            assert!((p.rotation - rest).abs() <= sway + 1e-5);
        }
    }
    assert_eq!(rays.rest_rotation(rays.len()), None);
}

#[test]
fn rays_group_leans_with_the_pointer() {
    let mut rays = BreathingRaysLayer::new(RaysParams::default(), 8);
    let coupling = RaysParams::default().pointer_coupling;
    rays.update(&leaning(0.0, 1.0, 0.0));
    let first = rays.group().rotation_z;
    assert!(first > 0.0 && first < coupling);
    for i in 1..400 {
        rays.update(&leaning(i as f32 / 60.0, 1.0, 0.0));
    }
    assert_abs_diff_eq!(rays.group().rotation_z, coupling, epsilon = 1e-4);
}

#[test]
fn instances_cover_every_particle() {
    let mut rays = BreathingRaysLayer::new(RaysParams::default(), 8);
    rays.update(&idle(0.5));
    let mut out = vec![ParticleInstance::default(); 100];
    rays.write_instances(&mut out);
    assert_eq!(out.len(), rays.len());
    for (inst, p) in out.iter().zip(rays.particles()) {
        assert_eq!(inst.position, p.position.to_array());
        assert_eq!(inst.rotation, p.rotation);
        assert!((0.0..=1.0).contains(&inst.color[3]));
    }
    let lanes: &[f32] = bytemuck::cast_slice(out.as_slice());
    assert_eq!(lanes.len(), out.len() * ParticleInstance::LANES);
}

#[test]
fn layer_kinds_round_trip_by_index() {
    for (i, kind) in LayerKind::ALL.iter().enumerate() {
        assert_eq!(LayerKind::from_index(i as u32), Some(*kind));
        assert_eq!(*kind as u32, i as u32);
    }
    assert_eq!(LayerKind::from_index(6), None);
    assert_eq!(LayerKind::ForceMotes.name(), "force-motes");
}
