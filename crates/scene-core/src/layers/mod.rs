//! Particle layers, drawn background to foreground in [`LayerKind`] order.
//!
//! Every layer owns a population created once from a seed. `update` mutates
//! particles in place and never allocates, so it can run every frame for
//! hours.

pub mod bokeh;
pub mod dust;
pub mod fog;
pub mod motes;
pub mod rays;

pub use bokeh::{CloseBokehLayer, PulsingBokehLayer};
pub use dust::WrappingDustLayer;
pub use fog::DriftFogLayer;
pub use motes::ForceMotesLayer;
pub use rays::BreathingRaysLayer;

use crate::frame::FrameInput;
use crate::particle::{Particle, ParticleInstance};
use glam::Vec3;

/// Layer identity in draw order (background first).
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    DriftFog = 0,
    PulsingBokeh = 1,
    WrappingDust = 2,
    BreathingRays = 3,
    ForceMotes = 4,
    CloseBokeh = 5,
}

impl LayerKind {
    pub const ALL: [LayerKind; 6] = [
        LayerKind::DriftFog,
        LayerKind::PulsingBokeh,
        LayerKind::WrappingDust,
        LayerKind::BreathingRays,
        LayerKind::ForceMotes,
        LayerKind::CloseBokeh,
    ];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::DriftFog => "drift-fog",
            LayerKind::PulsingBokeh => "pulsing-bokeh",
            LayerKind::WrappingDust => "wrapping-dust",
            LayerKind::BreathingRays => "breathing-rays",
            LayerKind::ForceMotes => "force-motes",
            LayerKind::CloseBokeh => "close-bokeh",
        }
    }
}

/// Transform applied by the renderer to a whole layer group.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroupTransform {
    pub offset: Vec3,
    pub rotation_z: f32,
}

impl GroupTransform {
    /// Parallax offset: the smoothed pointer scaled by `factor`.
    #[inline]
    pub fn parallax(smoothed_x: f32, smoothed_y: f32, factor: f32) -> Self {
        Self {
            offset: Vec3::new(smoothed_x * factor, smoothed_y * factor, 0.0),
            rotation_z: 0.0,
        }
    }
}

/// Shared shape of all particle layers.
pub trait ParticleLayer {
    fn kind(&self) -> LayerKind;

    fn particles(&self) -> &[Particle];

    /// Mutable view for tools and tests. A slice cannot change the population.
    fn particles_mut(&mut self) -> &mut [Particle];

    fn group(&self) -> GroupTransform;

    /// Palette indexed by `Particle::variant`.
    fn palette(&self) -> &[[f32; 3]];

    fn update(&mut self, frame: &FrameInput);

    fn len(&self) -> usize {
        self.particles().len()
    }

    fn is_empty(&self) -> bool {
        self.particles().is_empty()
    }

    /// Refill `out` with one instance per particle; reuse `out` across frames.
    fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        let palette = self.palette();
        out.extend(self.particles().iter().map(|p| {
            let rgb = palette
                .get(p.variant as usize)
                .copied()
                .unwrap_or([1.0, 1.0, 1.0]);
            ParticleInstance::new(p.position, p.scale, rgb, p.opacity, p.rotation)
        }));
    }
}
