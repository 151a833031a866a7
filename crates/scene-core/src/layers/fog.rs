//! Drift-Fog: a handful of large, dim patches drifting on slow Lissajous paths.

use super::{GroupTransform, LayerKind, ParticleLayer};
use crate::config::FogParams;
use crate::constants::FOG_SEED_OFFSET;
use crate::frame::FrameInput;
use crate::particle::Particle;
use crate::seeded::SeedStream;
use glam::Vec3;
use std::f32::consts::TAU;

const PALETTE: [[f32; 3]; 3] = [
    [0.18, 0.22, 0.42], // indigo haze
    [0.30, 0.18, 0.40], // violet haze
    [0.12, 0.28, 0.36], // teal haze
];

pub struct DriftFogLayer {
    params: FogParams,
    particles: Vec<Particle>,
    group: GroupTransform,
}

impl DriftFogLayer {
    pub fn new(params: FogParams, seed: u64) -> Self {
        let stream = SeedStream::new(seed, FOG_SEED_OFFSET);
        let particles = (0..params.count)
            .map(|i| {
                let base = Vec3::new(
                    stream.signed(i, 0, 5.0),
                    stream.signed(i, 1, 3.0),
                    stream.range(i, 2, -7.0, -4.0),
                );
                let size = stream.range(i, 3, 4.0, 7.0);
                let phase = stream.range(i, 4, 0.0, TAU);
                Particle::at(base, size, phase)
                    .with_variant(stream.bucket(i, 5, PALETTE.len()) as u8)
                    .with_intensity(stream.range(i, 6, 0.12, 0.28))
            })
            .collect();
        Self {
            params,
            particles,
            group: GroupTransform::default(),
        }
    }

    /// Drift offset from the base position at time `t` for a given phase.
    ///
    /// Harmonics of one base frequency, so the path closes every `2π/ω` and
    /// the offset is zero whenever `t·ω + phase` is a multiple of π.
    #[inline]
    pub fn drift_offset(&self, t: f32, phase: f32) -> Vec3 {
        let s = t * self.params.omega + phase;
        Vec3::new(
            s.sin() * self.params.drift.x,
            (2.0 * s).sin() * self.params.drift.y,
            (3.0 * s).sin() * self.params.drift.z,
        )
    }

    pub fn params(&self) -> &FogParams {
        &self.params
    }
}

impl ParticleLayer for DriftFogLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::DriftFog
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
        let fade = 1.0 - frame.scroll.progress * self.params.scroll_fade;
        let w_o = self.params.opacity_omega;
        for i in 0..self.particles.len() {
            let offset = self.drift_offset(t, self.particles[i].phase);
            let p = &mut self.particles[i];
            p.position = p.base_position() + offset;
            p.opacity = p.intensity * (0.75 + 0.25 * (t * w_o + p.phase).sin()) * fade;
            p.scale = p.size * (1.0 + 0.05 * (t * w_o * 0.5 + p.phase).sin());
        }
        self.group = GroupTransform::parallax(
            frame.pointer.smoothed_x,
            frame.pointer.smoothed_y,
            self.params.parallax,
        );
    }
}
