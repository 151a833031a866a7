//! Orbital body: a breathing nucleus with electrons on tilted circular orbits,
//! each leaving a fading trail.

use crate::config::OrbitalParams;
use crate::constants::{ORBIT_SEED_OFFSET, TRAIL_LENGTH};
use crate::frame::FrameInput;
use crate::particle::ParticleInstance;
use crate::seeded::SeedStream;
use glam::{Mat3, Vec3};
use smallvec::SmallVec;
use std::f32::consts::TAU;

const ELECTRON_SIZE: f32 = 0.08;
const ELECTRON_COLOR: [f32; 3] = [0.75, 0.90, 1.00];
// trail samples shrink toward this fraction of the electron size
const TRAIL_TAPER: f32 = 0.4;

/// Euler tilt of an orbit plane.
///
/// Composition order is pinned to X then Y then Z: `R = Rx(x) · Ry(y) · Rz(z)`,
/// so a vector is rotated about Z first.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Tilt {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn matrix(&self) -> Mat3 {
        Mat3::from_rotation_x(self.x)
            * Mat3::from_rotation_y(self.y)
            * Mat3::from_rotation_z(self.z)
    }

    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.matrix() * v
    }
}

/// Fixed-length ring of recent positions.
///
/// The length is set at construction and never changes; every slot is filled
/// from the start so a trail is always fully populated.
#[derive(Clone, Debug)]
pub struct Trail {
    samples: SmallVec<[Vec3; TRAIL_LENGTH]>,
    newest: usize,
}

impl Trail {
    /// `length` is raised to 1 if zero.
    pub fn new(length: usize, fill: Vec3) -> Self {
        Self {
            samples: SmallVec::from_elem(fill, length.max(1)),
            newest: 0,
        }
    }

    /// Overwrite the oldest sample.
    #[inline]
    pub fn push(&mut self, position: Vec3) {
        self.newest = (self.newest + 1) % self.samples.len();
        self.samples[self.newest] = position;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn newest(&self) -> Vec3 {
        self.samples[self.newest]
    }

    /// Samples from newest (age 0) to oldest.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        let len = self.samples.len();
        (0..len).map(move |age| self.samples[(self.newest + len - age) % len])
    }

    /// Rendered opacity for the sample of the given age; linear decay.
    #[inline]
    pub fn opacity_at(&self, age: usize) -> f32 {
        (1.0 - age as f32 / self.samples.len() as f32).max(0.0)
    }
}

#[derive(Clone, Debug)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
    pub phase: f32,
    pub base_tilt: Tilt,
    /// Scales pointer-driven tilt; inner orbits react more.
    pub sensitivity: f32,
    pub trail: Trail,
    pub position: Vec3,
}

impl Orbit {
    /// Point on the untilted orbit circle (XZ plane) at `angle`.
    #[inline]
    pub fn circle_point(&self, angle: f32) -> Vec3 {
        let (x, z) = (libm::cosf(angle), libm::sinf(angle));
        Vec3::new(x * self.radius, 0.0, z * self.radius)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nucleus {
    pub position: Vec3,
    pub scale: f32,
}

impl Default for Nucleus {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

pub struct OrbitalBody {
    params: OrbitalParams,
    nucleus: Nucleus,
    orbits: Vec<Orbit>,
}

impl OrbitalBody {
    pub fn new(params: OrbitalParams, seed: u64) -> Self {
        let stream = SeedStream::new(seed, ORBIT_SEED_OFFSET);
        let orbits = (0..params.count)
            .map(|i| {
                let radius = params.base_radius + i as f32 * params.radius_step;
                let mut orbit = Orbit {
                    radius,
                    // outer electrons are slower
                    angular_speed: params.base_speed * (params.base_radius / radius).sqrt(),
                    phase: stream.range(i, 0, 0.0, TAU),
                    base_tilt: Tilt::new(
                        stream.signed(i, 1, 0.6),
                        stream.signed(i, 2, 0.6),
                        stream.signed(i, 3, 0.3),
                    ),
                    sensitivity: 1.0 / (1.0 + i as f32 * params.sensitivity_falloff),
                    trail: Trail::new(params.trail_length, Vec3::ZERO),
                    position: Vec3::ZERO,
                };
                orbit.position = orbit.base_tilt.rotate(orbit.circle_point(orbit.phase));
                orbit.trail = Trail::new(params.trail_length, orbit.position);
                orbit
            })
            .collect();
        Self {
            params,
            nucleus: Nucleus::default(),
            orbits,
        }
    }

    /// Ease the nucleus toward the pointer and breathe. Runs before any layer
    /// update in a tick.
    pub fn update_nucleus(&mut self, frame: &FrameInput) {
        let prm = self.params;
        let breath = libm::sinf(frame.elapsed * prm.breath_omega);
        let target = Vec3::new(
            frame.pointer.smoothed_x * prm.nucleus_reach,
            frame.pointer.smoothed_y * prm.nucleus_reach + breath * prm.breath,
            0.0,
        );
        let follow = frame.blend(prm.nucleus_follow_rate);
        self.nucleus.position += (target - self.nucleus.position) * follow;
        self.nucleus.scale = 1.0 + breath * prm.breath;
    }

    /// Advance every electron: angle from elapsed time, pointer-coupled tilt,
    /// offset by the nucleus, then record the trail.
    pub fn update_electrons(&mut self, frame: &FrameInput) {
        let t = frame.elapsed;
        let gain = self.params.mouse_gain;
        let (sx, sy) = (frame.pointer.smoothed_x, frame.pointer.smoothed_y);
        let center = self.nucleus.position;

        for orbit in &mut self.orbits {
            let angle = t * orbit.angular_speed + orbit.phase;
            let k = orbit.sensitivity;
            let tilt = Tilt::new(
                orbit.base_tilt.x + sy * gain.x * k,
                orbit.base_tilt.y + sx * gain.y * k,
                orbit.base_tilt.z + sx * gain.z * k,
            );
            orbit.position = tilt.rotate(orbit.circle_point(angle)) + center;
            orbit.trail.push(orbit.position);
        }
    }

    pub fn nucleus(&self) -> Nucleus {
        self.nucleus
    }

    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    pub fn params(&self) -> &OrbitalParams {
        &self.params
    }

    /// All trail samples of all orbits, newest first within each orbit.
    pub fn write_trail_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        for orbit in &self.orbits {
            let len = orbit.trail.len() as f32;
            out.extend(orbit.trail.iter().enumerate().map(|(age, position)| {
                let taper = 1.0 - (1.0 - TRAIL_TAPER) * age as f32 / len;
                ParticleInstance::new(
                    position,
                    ELECTRON_SIZE * taper,
                    ELECTRON_COLOR,
                    orbit.trail.opacity_at(age),
                    0.0,
                )
            }));
        }
    }

    pub fn write_electron_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(self.orbits.iter().map(|o| {
            ParticleInstance::new(o.position, ELECTRON_SIZE, ELECTRON_COLOR, 1.0, 0.0)
        }));
    }
}
