//! Particle record and the renderer-facing instance layout.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One simulated particle.
///
/// The base position is fixed at creation and is the spring-return target for
/// force-directed layers; it has a getter but no setter. `position` and
/// `velocity` evolve every tick; `scale`, `opacity` and `rotation` are
/// re-derived every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    base_position: Vec3,
    pub velocity: Vec3,
    pub phase: f32,
    pub size: f32,
    /// Palette slot or shape variant, layer specific.
    pub variant: u8,
    /// Twinkle rate (rad/s) for layers that sparkle.
    pub sparkle: f32,
    /// Seeded peak opacity; per-tick modulation scales this.
    pub intensity: f32,
    pub scale: f32,
    pub opacity: f32,
    pub rotation: f32,
}

impl Particle {
    pub fn at(base_position: Vec3, size: f32, phase: f32) -> Self {
        Self {
            position: base_position,
            base_position,
            velocity: Vec3::ZERO,
            phase,
            size,
            variant: 0,
            sparkle: 0.0,
            intensity: 1.0,
            scale: size,
            opacity: 1.0,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn with_variant(mut self, variant: u8) -> Self {
        self.variant = variant;
        self
    }

    #[inline]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn with_sparkle(mut self, sparkle: f32) -> Self {
        self.sparkle = sparkle;
        self
    }

    #[inline]
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self.opacity = intensity;
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    /// Distance from the spring-return target.
    #[inline]
    pub fn displacement(&self) -> f32 {
        (self.position - self.base_position).length()
    }
}

/// Per-instance record uploaded by a renderer.
///
/// Positions are layer-local; the layer's [`crate::GroupTransform`] is applied
/// by the renderer on the whole group.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub scale: f32,
    /// RGB plus opacity.
    pub color: [f32; 4],
    pub rotation: f32,
}

impl ParticleInstance {
    /// Number of `f32` lanes per instance in a flat buffer.
    pub const LANES: usize = 9;

    #[inline]
    pub fn new(position: Vec3, scale: f32, rgb: [f32; 3], opacity: f32, rotation: f32) -> Self {
        Self {
            position: position.to_array(),
            scale,
            color: [rgb[0], rgb[1], rgb[2], opacity.clamp(0.0, 1.0)],
            rotation,
        }
    }
}
