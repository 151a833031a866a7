//! Breathing-Rays: a fan of light wedges hanging from the top of the view.

use super::{GroupTransform, LayerKind, ParticleLayer};
use crate::config::RaysParams;
use crate::constants::RAYS_SEED_OFFSET;
use crate::frame::FrameInput;
use crate::particle::Particle;
use crate::seeded::{value_noise3, SeedStream};
use glam::Vec3;
use std::f32::consts::TAU;

const PALETTE: [[f32; 3]; 2] = [[1.00, 0.95, 0.85], [0.85, 0.90, 1.00]];

const FAN_SPREAD: f32 = 1.2; // radians across the whole fan
const ANCHOR_Y: f32 = 4.5;
const ANCHOR_Z: f32 = -5.0;

pub struct BreathingRaysLayer {
    params: RaysParams,
    particles: Vec<Particle>,
    /// Resting roll of each ray; the sway oscillates around it.
    rest_rotation: Vec<f32>,
    group: GroupTransform,
}

impl BreathingRaysLayer {
    pub fn new(params: RaysParams, seed: u64) -> Self {
        let stream = SeedStream::new(seed, RAYS_SEED_OFFSET);
        let n = params.count;
        let particles = (0..n)
            .map(|i| {
                let fan = if n > 1 {
                    i as f32 / (n - 1) as f32 - 0.5
                } else {
                    0.0
                };
                let base = Vec3::new(
                    fan * 6.0 + stream.signed(i, 0, 0.4),
                    ANCHOR_Y,
                    ANCHOR_Z + stream.signed(i, 1, 0.5),
                );
                let rotation = fan * FAN_SPREAD + stream.signed(i, 2, 0.08);
                let size = stream.range(i, 3, 4.0, 7.0);
                let phase = stream.range(i, 4, 0.0, TAU);
                Particle::at(base, size, phase)
                    .with_variant(stream.bucket(i, 5, PALETTE.len()) as u8)
                    .with_intensity(stream.range(i, 6, 0.06, 0.14))
                    .with_rotation(rotation)
            })
            .collect::<Vec<Particle>>();
        let rest_rotation = particles.iter().map(|p| p.rotation).collect();
        Self {
            params,
            particles,
            rest_rotation,
            group: GroupTransform::default(),
        }
    }

    pub fn rest_rotation(&self, index: usize) -> Option<f32> {
        self.rest_rotation.get(index).copied()
    }
}

impl ParticleLayer for BreathingRaysLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::BreathingRays
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
        let prm = self.params;
        for (i, (p, rest)) in self
            .particles
            .iter_mut()
            .zip(self.rest_rotation.iter())
            .enumerate()
        {
            p.scale = p.size * (1.0 + (t * prm.breath_omega + p.phase).sin() * prm.breath_amp);
            p.rotation = rest + (t * prm.sway_omega + p.phase).sin() * prm.sway;
            let flicker = value_noise3(i as f32 * 1.7, t * prm.flicker_speed, p.phase);
            p.opacity = p.intensity * (0.65 + 0.35 * flicker);
            p.position = p.base_position();
        }
        let target = frame.pointer.smoothed_x * prm.pointer_coupling;
        self.group.rotation_z += (target - self.group.rotation_z) * prm.rotation_alpha;
    }
}
