//! Bokeh discs: the mid-depth pulsing set and the out-of-focus close set.

use super::{GroupTransform, LayerKind, ParticleLayer};
use crate::config::{BokehParams, CloseBokehParams};
use crate::constants::{BOKEH_SEED_OFFSET, CLOSE_BOKEH_SEED_OFFSET};
use crate::frame::FrameInput;
use crate::particle::Particle;
use crate::seeded::SeedStream;
use glam::Vec3;
use std::f32::consts::TAU;

const PULSING_PALETTE: [[f32; 3]; 4] = [
    [0.95, 0.78, 0.55], // warm gold
    [0.55, 0.75, 1.00], // cool blue
    [0.85, 0.60, 0.95], // lilac
    [1.00, 1.00, 1.00],
];

const CLOSE_PALETTE: [[f32; 3]; 2] = [[0.90, 0.85, 1.00], [0.70, 0.85, 1.00]];

// mid-depth plane the pulsing set is centered on
const PULSING_DEPTH: f32 = -3.0;

pub struct PulsingBokehLayer {
    params: BokehParams,
    particles: Vec<Particle>,
    group: GroupTransform,
}

impl PulsingBokehLayer {
    pub fn new(params: BokehParams, seed: u64) -> Self {
        let stream = SeedStream::new(seed, BOKEH_SEED_OFFSET);
        let b = params.bounds;
        let particles = (0..params.count)
            .map(|i| {
                let base = Vec3::new(
                    stream.signed(i, 0, b.x),
                    stream.signed(i, 1, b.y),
                    PULSING_DEPTH + stream.signed(i, 2, b.z),
                );
                let size = stream.range(i, 3, 0.3, 0.9);
                let phase = stream.range(i, 4, 0.0, TAU);
                Particle::at(base, size, phase)
                    .with_variant(stream.bucket(i, 5, PULSING_PALETTE.len()) as u8)
                    .with_intensity(stream.range(i, 6, 0.6, 1.0))
            })
            .collect();
        Self {
            params,
            particles,
            group: GroupTransform::default(),
        }
    }

    /// 0 at the horizontal center, 1 at (or beyond) the x bound.
    #[inline]
    pub fn edge_factor(&self, x: f32) -> f32 {
        (x.abs() / self.params.bounds.x).min(1.0)
    }

    pub fn params(&self) -> &BokehParams {
        &self.params
    }
}

impl ParticleLayer for PulsingBokehLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::PulsingBokeh
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
        &PULSING_PALETTE
    }

    fn update(&mut self, frame: &FrameInput) {
        let t = frame.elapsed;
        let prm = self.params;
        for i in 0..self.particles.len() {
            let edge = self.edge_factor(self.particles[i].base_position().x);
            let p = &mut self.particles[i];
            p.scale = p.size * (1.0 + (t * prm.pulse_omega + p.phase).sin() * prm.pulse_amp);
            let flicker = 0.6 + 0.4 * (t * prm.opacity_omega + 1.3 * p.phase).sin();
            p.opacity = ((prm.min_opacity + edge * prm.edge_gain) * flicker * p.intensity)
                .clamp(0.0, 1.0);
            p.position = p.base_position();
            p.position.y += (t * prm.float_omega + p.phase).sin() * prm.float_amp;
        }
        self.group = GroupTransform::parallax(
            frame.pointer.smoothed_x,
            frame.pointer.smoothed_y,
            prm.parallax,
        );
    }
}

pub struct CloseBokehLayer {
    params: CloseBokehParams,
    particles: Vec<Particle>,
    group: GroupTransform,
}

impl CloseBokehLayer {
    pub fn new(params: CloseBokehParams, seed: u64) -> Self {
        let stream = SeedStream::new(seed, CLOSE_BOKEH_SEED_OFFSET);
        let r = params.max_radius;
        let particles = (0..params.count)
            .map(|i| {
                let base = Vec3::new(
                    stream.signed(i, 0, r),
                    stream.signed(i, 1, 0.6 * r),
                    stream.range(i, 2, 3.0, 5.0),
                );
                let size = stream.range(i, 3, 1.2, 2.0);
                let phase = stream.range(i, 4, 0.0, TAU);
                Particle::at(base, size, phase)
                    .with_variant(stream.bucket(i, 5, CLOSE_PALETTE.len()) as u8)
                    .with_intensity(stream.range(i, 6, 0.05, 0.12))
            })
            .collect();
        Self {
            params,
            particles,
            group: GroupTransform::default(),
        }
    }

    /// Opacity weight by distance from the view center; the middle stays clear.
    #[inline]
    pub fn center_weight(&self, position: Vec3) -> f32 {
        let d = position.truncate().length();
        (0.35 + 0.65 * d / self.params.max_radius).clamp(0.0, 1.0)
    }

    pub fn params(&self) -> &CloseBokehParams {
        &self.params
    }
}

impl ParticleLayer for CloseBokehLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::CloseBokeh
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
        &CLOSE_PALETTE
    }

    fn update(&mut self, frame: &FrameInput) {
        let t = frame.elapsed;
        let w = self.params.omega;
        let k = self.params.drift;
        for i in 0..self.particles.len() {
            let p = self.particles[i];
            let position = p.base_position()
                + Vec3::new(
                    (t * w + p.phase).sin() * k,
                    (t * w * 0.8 + p.phase).cos() * k,
                    0.0,
                );
            let weight = self.center_weight(position);
            let p = &mut self.particles[i];
            p.position = position;
            p.opacity = p.intensity * weight;
            p.scale = p.size;
        }
        self.group = GroupTransform::parallax(
            frame.pointer.smoothed_x,
            frame.pointer.smoothed_y,
            self.params.parallax,
        );
    }
}
