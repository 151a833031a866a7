//! Scene tuning constants.
//!
//! These express intended behavior (smoothing factors, frequencies, bounds,
//! populations) and keep magic numbers out of the update rules. The `*Params`
//! defaults in [`crate::config`] are built from them.

// Frame driving
pub const MAX_FRAME_DT: f32 = 0.1; // clamp for long pauses (tab switch, debugger)
pub const REFERENCE_FPS: f32 = 60.0; // per-tick rules are tuned at this rate

// Pointer input
pub const POINTER_SMOOTHING: f32 = 0.05; // engine-wide exponential smoothing per tick
pub const POINTER_VELOCITY_SCALE: f32 = 0.5; // centered delta -> raw delta, avoids overshoot

// Seed offsets (disjoint so layers never share a seed stream)
pub const FOG_SEED_OFFSET: f64 = 1_000.0;
pub const BOKEH_SEED_OFFSET: f64 = 2_000.0;
pub const CLOSE_BOKEH_SEED_OFFSET: f64 = 3_000.0;
pub const RAYS_SEED_OFFSET: f64 = 4_000.0;
pub const ORBIT_SEED_OFFSET: f64 = 5_000.0;
pub const MOTES_SEED_OFFSET: f64 = 10_000.0;
pub const DUST_SEED_OFFSET: f64 = 100_000.0;

// Drift-Fog
pub const FOG_COUNT: usize = 4;
pub const FOG_OMEGA: f32 = 0.08; // base angular frequency of the Lissajous drift
pub const FOG_OPACITY_OMEGA: f32 = 0.15;
pub const FOG_DRIFT: [f32; 3] = [0.6, 0.35, 0.2]; // per-axis drift amplitude
pub const FOG_PARALLAX: f32 = 0.05;
pub const FOG_SCROLL_FADE: f32 = 0.5; // opacity lost at full scroll

// Pulsing-Bokeh
pub const BOKEH_COUNT: usize = 12;
pub const BOKEH_BOUNDS: [f32; 3] = [7.0, 4.0, 2.0];
pub const BOKEH_PULSE_OMEGA: f32 = 0.6;
pub const BOKEH_PULSE_AMP: f32 = 0.25;
pub const BOKEH_OPACITY_OMEGA: f32 = 0.4;
pub const BOKEH_FLOAT_OMEGA: f32 = 0.3;
pub const BOKEH_FLOAT_AMP: f32 = 0.15;
pub const BOKEH_MIN_OPACITY: f32 = 0.08;
pub const BOKEH_EDGE_GAIN: f32 = 0.22; // edge particles read brighter than center ones
pub const BOKEH_PARALLAX: f32 = 0.2;

// Wrapping-Dust
pub const DUST_COUNT: usize = 3_000;
pub const DUST_BOUNDS: [f32; 3] = [9.0, 6.0, 4.0];
pub const DUST_SPEED: f32 = 0.002; // max initial velocity per reference tick
pub const DUST_NOISE_FREQ: f32 = 0.35;
pub const DUST_NOISE_SPEED: f32 = 0.05;
pub const DUST_NOISE_AMP: f32 = 0.004;
pub const DUST_PARALLAX: f32 = 0.15;

// Breathing-Rays
pub const RAYS_COUNT: usize = 7;
pub const RAYS_BREATH_OMEGA: f32 = 0.35;
pub const RAYS_BREATH_AMP: f32 = 0.12;
pub const RAYS_SWAY_OMEGA: f32 = 0.2;
pub const RAYS_SWAY: f32 = 0.06; // radians
pub const RAYS_FLICKER_SPEED: f32 = 0.8;
pub const RAYS_POINTER_COUPLING: f32 = 0.12; // radians of group roll at full pointer X
pub const RAYS_ROTATION_ALPHA: f32 = 0.05;

// Force-Motes
pub const MOTES_COUNT: usize = 240;
pub const MOTES_WORLD_EXTENT: [f32; 2] = [6.0, 3.5]; // pointer [-1,1] -> world plane
pub const MOTES_POINTER_ALPHA: f32 = 0.25; // local, snappier than the engine-wide filter
pub const MOTE_EPSILON: f32 = 1e-4;
pub const MOTES_INFLUENCE_RADIUS: f32 = 2.0;
pub const MOTES_ORBIT_RADIUS: f32 = 0.8;
pub const MOTES_ATTRACTION: f32 = 0.004;
pub const MOTES_ORBIT_SPEED: f32 = 0.003;
pub const MOTES_RELEASE_THRESHOLD: f32 = 0.01; // centered units per tick
pub const MOTES_RELEASE_GAIN: f32 = 0.35;
pub const MOTES_RELEASE_COOLDOWN: u16 = 12; // ticks
pub const MOTES_RETURN_STIFFNESS: f32 = 0.01;
pub const MOTES_AMBIENT: f32 = 0.00004;
pub const MOTES_AMBIENT_OMEGA: f32 = 0.5;
pub const MOTES_DAMPING: f32 = 0.96;

// Close-Bokeh
pub const CLOSE_BOKEH_COUNT: usize = 6;
pub const CLOSE_BOKEH_OMEGA: f32 = 0.05;
pub const CLOSE_BOKEH_DRIFT: f32 = 0.4;
pub const CLOSE_BOKEH_PARALLAX: f32 = 1.0;
pub const CLOSE_BOKEH_MAX_RADIUS: f32 = 5.0;

// Orbital atom
pub const ORBIT_COUNT: usize = 3;
pub const ORBIT_BASE_RADIUS: f32 = 1.2;
pub const ORBIT_RADIUS_STEP: f32 = 0.45;
pub const ORBIT_BASE_SPEED: f32 = 0.9; // rad/s of the innermost electron
pub const ORBIT_MOUSE_GAIN: [f32; 3] = [0.5, 0.5, 0.25]; // tilt per unit pointer (x<-y, y<-x, z<-x)
pub const ORBIT_SENSITIVITY_FALLOFF: f32 = 0.35;
pub const TRAIL_LENGTH: usize = 24;
pub const NUCLEUS_REACH: f32 = 0.4; // world units at full pointer deflection
pub const NUCLEUS_FOLLOW_RATE: f32 = 0.02;
pub const NUCLEUS_BREATH_OMEGA: f32 = 1.2;
pub const NUCLEUS_BREATH: f32 = 0.05;

// Energy field
pub const ENERGY_FREQUENCY: f32 = 1.5;
pub const ENERGY_SPEED: f32 = 0.3;
pub const ENERGY_AMPLITUDE: f32 = 0.25;
pub const ENERGY_ATTRACTION_RADIUS: f32 = 1.5;
pub const ENERGY_ATTRACTION_STRENGTH: f32 = 0.3;
pub const ENERGY_FRESNEL_POWER: f32 = 2.5;
pub const ENERGY_BASE_OPACITY: f32 = 0.6;

// Camera
pub const CAMERA_BASE_POSITION: [f32; 3] = [0.0, 0.0, 8.0];
pub const CAMERA_DRIFT_OMEGA: [f32; 2] = [0.11, 0.07]; // two low, non-harmonic frequencies
pub const CAMERA_DRIFT_AMP: [f32; 2] = [0.3, 0.2];
pub const CAMERA_PARALLAX_GAIN: f32 = 0.6;
pub const CAMERA_LOOK_GAIN: f32 = 0.25; // re-aims more conservatively than it translates
pub const CAMERA_SMOOTHING: f32 = 0.05;
pub const CAMERA_SCROLL_LIFT: f32 = 1.5;
pub const CAMERA_SCROLL_DOLLY: f32 = 1.0;
