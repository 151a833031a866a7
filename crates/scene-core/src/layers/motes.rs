//! Force-Motes: light motes pulled toward the pointer, swirled around it when
//! close, flung by fast pointer movement, and sprung back to their rest spots.
//!
//! Per mote, per tick:
//! 1. `to = pointer_world − position`, `d = |to|`.
//! 2. Inside the influence radius (and farther than epsilon): linear-falloff
//!    attraction; inside the orbit radius an extra perpendicular swirl; when the
//!    pointer moves faster than the release threshold, a fling impulse (subject
//!    to a per-mote cooldown).
//! 3. Spring back toward `base_position` plus a small ambient float.
//! 4. Damping.
//! 5. Integrate.
//!
//! Constants are per reference tick (1/60 s). Forces and displacement scale
//! with `FrameInput::step`, damping is raised to the step, so a frame with
//! `dt = 0` leaves the swarm where it is.
//!
//! With damping below 1 and no pointer forcing the swarm is dissipative: every
//! mote settles back onto its base position.

use super::{GroupTransform, LayerKind, ParticleLayer};
use crate::config::MotesParams;
use crate::constants::MOTES_SEED_OFFSET;
use crate::frame::FrameInput;
use crate::particle::Particle;
use crate::seeded::SeedStream;
use glam::Vec3;
use std::f32::consts::TAU;

const PALETTE: [[f32; 3]; 3] = [
    [1.00, 0.90, 0.65], // ember
    [0.70, 0.90, 1.00], // frost
    [1.00, 1.00, 1.00],
];

const PROXIMITY_GLOW: f32 = 0.8;
const PROXIMITY_SWELL: f32 = 0.5;

pub struct ForceMotesLayer {
    params: MotesParams,
    particles: Vec<Particle>,
    /// Remaining release cooldown per mote in reference ticks, parallel to
    /// `particles`.
    cooldowns: Vec<f32>,
    pointer_world: Vec3,
    pointer_tracking: bool,
}

impl ForceMotesLayer {
    pub fn new(params: MotesParams, seed: u64) -> Self {
        let stream = SeedStream::new(seed, MOTES_SEED_OFFSET);
        let ext = params.world_extent;
        let particles: Vec<Particle> = (0..params.count)
            .map(|i| {
                let base = Vec3::new(
                    stream.signed(i, 0, ext.x),
                    stream.signed(i, 1, ext.y),
                    stream.signed(i, 2, 0.5),
                );
                let size = stream.range(i, 3, 0.02, 0.07);
                let phase = stream.range(i, 4, 0.0, TAU);
                Particle::at(base, size, phase)
                    .with_variant(stream.bucket(i, 5, PALETTE.len()) as u8)
                    .with_sparkle(stream.range(i, 6, 1.0, 4.0))
                    .with_intensity(stream.range(i, 7, 0.4, 0.9))
            })
            .collect();
        let cooldowns = vec![0.0; particles.len()];
        Self {
            params,
            particles,
            cooldowns,
            pointer_world: Vec3::ZERO,
            pointer_tracking: false,
        }
    }

    /// Pointer position on the mote plane, smoothed with the layer's own
    /// (snappier) factor.
    pub fn pointer_world(&self) -> Vec3 {
        self.pointer_world
    }

    pub fn params(&self) -> &MotesParams {
        &self.params
    }

    /// Largest distance of any mote from its base position.
    pub fn max_displacement(&self) -> f32 {
        self.particles
            .iter()
            .map(Particle::displacement)
            .fold(0.0, f32::max)
    }

    pub fn mean_displacement(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.particles.iter().map(Particle::displacement).sum();
        sum / self.particles.len() as f32
    }

    fn track_pointer(&mut self, frame: &FrameInput) {
        if !frame.pointer.active {
            return;
        }
        let (cx, cy) = frame.pointer.centered_target();
        let ext = self.params.world_extent;
        let target = Vec3::new(cx * ext.x, cy * ext.y, 0.0);
        if self.pointer_tracking {
            let alpha = frame.blend(self.params.pointer_alpha);
            self.pointer_world += (target - self.pointer_world) * alpha;
        } else {
            self.pointer_world = target;
            self.pointer_tracking = true;
        }
    }
}

impl ParticleLayer for ForceMotesLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::ForceMotes
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    fn group(&self) -> GroupTransform {
        GroupTransform::default()
    }

    fn palette(&self) -> &[[f32; 3]] {
        &PALETTE
    }

    fn update(&mut self, frame: &FrameInput) {
        self.track_pointer(frame);

        let prm = self.params;
        let t = frame.elapsed;
        let step = frame.step();
        let damping = prm.damping.powf(step);
        let pointer = frame.pointer;
        let pointer_world = self.pointer_world;
        let pointer_velocity = Vec3::new(
            pointer.velocity_x * prm.world_extent.x,
            pointer.velocity_y * prm.world_extent.y,
            0.0,
        );
        let releasing = pointer.active && pointer.speed() > prm.release_threshold;

        for (p, cooldown) in self.particles.iter_mut().zip(self.cooldowns.iter_mut()) {
            *cooldown = (*cooldown - step).max(0.0);
            let mut proximity = 0.0;
            let mut force = Vec3::ZERO;

            if pointer.active {
                let to_pointer = pointer_world - p.position;
                let distance = to_pointer.length();
                if distance < prm.influence_radius && distance > prm.epsilon {
                    let dir = to_pointer / distance;
                    let attraction = (prm.influence_radius - distance) / prm.influence_radius;
                    force += dir * attraction * prm.attraction;

                    if distance < prm.orbit_radius {
                        force += Vec3::new(-dir.y, dir.x, 0.0) * prm.orbit_speed;
                    }

                    // impulse, not a force: applied once regardless of step
                    if releasing && *cooldown <= 0.0 && step > 0.0 {
                        p.velocity += pointer_velocity * prm.release_gain;
                        *cooldown = f32::from(prm.release_cooldown_ticks);
                    }
                    proximity = attraction;
                }
            }

            force += (p.base_position() - p.position) * prm.return_stiffness;
            force.y += (t * prm.ambient_omega + p.phase).sin() * prm.ambient;
            p.velocity += force * step;
            p.velocity *= damping;
            p.position += p.velocity * step;

            let twinkle = 0.6 + 0.4 * (t * p.sparkle + p.phase).sin();
            p.opacity = (p.intensity * twinkle * (1.0 + proximity * PROXIMITY_GLOW)).min(1.0);
            p.scale = p.size * (1.0 + proximity * PROXIMITY_SWELL);
        }
    }
}
