//! Wrapping-Dust: thousands of fine specks drifting through a toroidal box.

use super::{GroupTransform, LayerKind, ParticleLayer};
use crate::config::DustParams;
use crate::constants::DUST_SEED_OFFSET;
use crate::frame::FrameInput;
use crate::particle::Particle;
use crate::seeded::{value_noise3, SeedStream};
use glam::Vec3;
use std::f32::consts::TAU;

const PALETTE: [[f32; 3]; 2] = [[0.92, 0.94, 1.00], [1.00, 0.92, 0.80]];

// decorrelate the three noise lookups
const NOISE_OFFSET_Y: [f32; 2] = [31.7, 11.3];
const NOISE_OFFSET_Z: [f32; 2] = [57.1, 23.9];

/// Toroidal wrap of one coordinate: past `+bound` reappears at `-bound` and
/// vice versa. Values inside the box are returned unchanged.
#[inline]
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value > bound {
        -bound
    } else if value < -bound {
        bound
    } else {
        value
    }
}

#[inline]
pub fn wrap_position(position: Vec3, bounds: Vec3) -> Vec3 {
    Vec3::new(
        wrap_axis(position.x, bounds.x),
        wrap_axis(position.y, bounds.y),
        wrap_axis(position.z, bounds.z),
    )
}

pub struct WrappingDustLayer {
    params: DustParams,
    particles: Vec<Particle>,
    group: GroupTransform,
}

impl WrappingDustLayer {
    pub fn new(params: DustParams, seed: u64) -> Self {
        let stream = SeedStream::new(seed, DUST_SEED_OFFSET);
        let b = params.bounds;
        let s = params.speed;
        let particles = (0..params.count)
            .map(|i| {
                let base = Vec3::new(
                    stream.signed(i, 0, b.x),
                    stream.signed(i, 1, b.y),
                    stream.signed(i, 2, b.z),
                );
                let velocity = Vec3::new(
                    stream.signed(i, 3, s),
                    stream.signed(i, 4, s),
                    stream.signed(i, 5, s * 0.5),
                );
                let size = stream.range(i, 6, 0.01, 0.04);
                let phase = stream.range(i, 7, 0.0, TAU);
                Particle::at(base, size, phase)
                    .with_velocity(velocity)
                    .with_variant(stream.bucket(i, 8, PALETTE.len()) as u8)
                    .with_sparkle(stream.range(i, 9, 0.5, 3.0))
                    .with_intensity(stream.range(i, 10, 0.2, 0.7))
            })
            .collect();
        Self {
            params,
            particles,
            group: GroupTransform::default(),
        }
    }

    pub fn bounds(&self) -> Vec3 {
        self.params.bounds
    }

    /// Noise drift per reference tick at `position` and time `t`.
    #[inline]
    pub fn drift(&self, position: Vec3, t: f32) -> Vec3 {
        let q = position * self.params.noise_freq;
        let ts = t * self.params.noise_speed;
        Vec3::new(
            value_noise3(q.x, q.y, ts) - 0.5,
            value_noise3(q.y + NOISE_OFFSET_Y[0], q.z, ts + NOISE_OFFSET_Y[1]) - 0.5,
            value_noise3(q.z + NOISE_OFFSET_Z[0], q.x, ts + NOISE_OFFSET_Z[1]) - 0.5,
        ) * self.params.noise_amp
    }
}

impl ParticleLayer for WrappingDustLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::WrappingDust
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    fn group(&self) -> GroupTransform {
        self.group
    }

    fn palette(&self) -> &[[f32; 3]] {
        &PALETTE
    }

    fn update(&mut self, frame: &FrameInput) {
        let t = frame.elapsed;
        let step = frame.step();
        let bounds = self.params.bounds;
        for i in 0..self.particles.len() {
            let drift = self.drift(self.particles[i].position, t);
            let p = &mut self.particles[i];
            p.position = wrap_position(p.position + (p.velocity + drift) * step, bounds);
            p.opacity = p.intensity * (0.55 + 0.45 * (t * p.sparkle + p.phase).sin());
            p.scale = p.size;
        }
        self.group = GroupTransform::parallax(
            frame.pointer.smoothed_x,
            frame.pointer.smoothed_y,
            self.params.parallax,
        );
    }
}
