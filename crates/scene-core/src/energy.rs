//! Energy-field displacement for the orbital body's shell.
//!
//! A pure function of position, time and the pointer. Renderers evaluate it
//! per vertex or per sample; nothing here keeps state between calls.

use crate::config::EnergyFieldParams;
use crate::seeded::value_noise3;
use glam::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    pub offset: Vec3,
    /// Fresnel-style opacity, highest at grazing angles.
    pub translucency: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EnergyField {
    params: EnergyFieldParams,
}

impl EnergyField {
    pub fn new(params: EnergyFieldParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EnergyFieldParams {
        &self.params
    }

    /// Displace a surface point of a shell centered on the origin.
    ///
    /// The pointer pull is skipped when the point is within `epsilon` of the
    /// pointer or outside the attraction radius. A point at the origin has no
    /// normal and gets neither noise offset nor translucency from facing.
    pub fn displace(&self, position: Vec3, time: f32, pointer_world: Vec3) -> Displacement {
        let prm = &self.params;
        let normal = position.normalize_or_zero();

        let q = position * prm.frequency + Vec3::splat(time * prm.speed);
        // noise is in [0, 1): the shell only ever swells outward
        let noise = value_noise3(q.x, q.y, q.z);
        let mut offset = normal * noise * prm.amplitude;

        let to_pointer = pointer_world - position;
        let distance = to_pointer.length();
        if distance > prm.epsilon && distance < prm.attraction_radius {
            let pull = (prm.attraction_radius - distance) / prm.attraction_radius;
            offset += to_pointer / distance * pull * prm.attraction_strength;
        }

        let facing = prm.view_dir.normalize_or_zero().dot(normal).abs();
        let rim = (1.0 - facing).clamp(0.0, 1.0);
        let translucency = rim.powf(prm.fresnel_power) * prm.base_opacity;

        Displacement {
            offset,
            translucency,
        }
    }
}
