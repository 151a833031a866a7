//! Seeded pseudo-randomness and smooth value noise.
//!
//! Every value that has to match between a pre-render pass and the first live
//! frame is derived from these functions and static indices only. They are
//! evaluated in `f64` with `libm` trigonometry, so native and `wasm32` builds
//! produce the same bits, and never touch wall-clock time or global state.

const HASH_K1: f64 = 12.9898;
const HASH_K2: f64 = 78.233;
const HASH_M: f64 = 43758.5453;

// Lattice hash multipliers for value_noise3
const LATTICE_X: f64 = 157.0;
const LATTICE_Y: f64 = 113.0;
const LATTICE_Z: f64 = 271.0;

// Attribute spacing inside a SeedStream
const STREAM_INDEX_STRIDE: f64 = 17.0;
const STREAM_ATTRIBUTE_STRIDE: f64 = 0.731;

/// Largest prime below 2^32. Seeds are reduced modulo this before they become
/// an `f64`, so the stream strides stay representable next to the base.
pub const SEED_MODULUS: u64 = 4_294_967_291;

/// Deterministic pseudo-random value in `[0, 1)` for `seed`.
///
/// `frac(sin(seed·k)·m)` with `frac(x) = x − floor(x)`, so negative sines
/// still land in `[0, 1)`. Not suitable for anything security related.
#[inline]
pub fn seeded_random(seed: f64) -> f64 {
    let x = libm::sin(seed * HASH_K1 + seed * HASH_K2) * HASH_M;
    let f = x - x.floor();
    // floor can round up to x for huge magnitudes
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Seeded value mapped into `[lo, hi)`.
#[inline]
pub fn seeded_range(seed: f64, lo: f32, hi: f32) -> f32 {
    lo + (seeded_random(seed) as f32) * (hi - lo)
}

/// Cubic smoothstep on a unit interval: `t²(3 − 2t)`.
#[inline]
pub fn smoothstep_unit(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Independent seeded attributes for the particles of one layer.
///
/// Attribute `k` of particle `i` is `seeded_random(base + i·17 + k·0.731)`;
/// no mutable generator state is shared, so draw order cannot change results.
/// Seeds at or above [`SEED_MODULUS`] wrap around it.
#[derive(Clone, Copy, Debug)]
pub struct SeedStream {
    base: f64,
}

impl SeedStream {
    pub fn new(seed: u64, layer_offset: f64) -> Self {
        Self {
            base: (seed % SEED_MODULUS) as f64 + layer_offset,
        }
    }

    #[inline]
    pub fn value(&self, index: usize, attribute: u32) -> f32 {
        // narrowing can round values just below 1 up to 1
        (self.raw(index, attribute) as f32).min(1.0 - f32::EPSILON)
    }

    #[inline]
    pub fn raw(&self, index: usize, attribute: u32) -> f64 {
        seeded_random(
            self.base
                + index as f64 * STREAM_INDEX_STRIDE
                + attribute as f64 * STREAM_ATTRIBUTE_STRIDE,
        )
    }

    #[inline]
    pub fn range(&self, index: usize, attribute: u32, lo: f32, hi: f32) -> f32 {
        lo + self.value(index, attribute) * (hi - lo)
    }

    /// Symmetric range `[-half, half)`.
    #[inline]
    pub fn signed(&self, index: usize, attribute: u32, half: f32) -> f32 {
        self.range(index, attribute, -half, half)
    }

    /// Bucket index in `0..buckets` (palette slot, shape variant).
    #[inline]
    pub fn bucket(&self, index: usize, attribute: u32, buckets: usize) -> usize {
        if buckets == 0 {
            return 0;
        }
        let slot = (self.raw(index, attribute) * buckets as f64) as usize;
        slot.min(buckets - 1)
    }
}

#[inline]
fn lattice(ix: f64, iy: f64, iz: f64) -> f64 {
    seeded_random(ix * LATTICE_X + iy * LATTICE_Y + iz * LATTICE_Z + 1.0)
}

/// Smooth 3D value noise in `[0, 1)`.
///
/// Seeded lattice values at the eight cell corners are blended with smoothstep
/// weights, then mixed with a slow sinusoid so neighbouring cells do not read
/// as a grid. Continuous along every axis.
pub fn value_noise3(x: f32, y: f32, z: f32) -> f32 {
    let (x, y, z) = (x as f64, y as f64, z as f64);
    let (ix, iy, iz) = (x.floor(), y.floor(), z.floor());
    let u = smoothstep_unit((x - ix) as f32) as f64;
    let v = smoothstep_unit((y - iy) as f32) as f64;
    let w = smoothstep_unit((z - iz) as f32) as f64;

    let c000 = lattice(ix, iy, iz);
    let c100 = lattice(ix + 1.0, iy, iz);
    let c010 = lattice(ix, iy + 1.0, iz);
    let c110 = lattice(ix + 1.0, iy + 1.0, iz);
    let c001 = lattice(ix, iy, iz + 1.0);
    let c101 = lattice(ix + 1.0, iy, iz + 1.0);
    let c011 = lattice(ix, iy + 1.0, iz + 1.0);
    let c111 = lattice(ix + 1.0, iy + 1.0, iz + 1.0);

    let x00 = lerp(c000, c100, u);
    let x10 = lerp(c010, c110, u);
    let x01 = lerp(c001, c101, u);
    let x11 = lerp(c011, c111, u);
    let y0 = lerp(x00, x10, v);
    let y1 = lerp(x01, x11, v);
    let lattice_value = lerp(y0, y1, w);

    let wave = 0.5 + 0.5 * libm::sin(x * 0.7 + y * 1.3 + z * 0.9);
    let n = (0.8 * lattice_value + 0.2 * wave) as f32;
    n.clamp(0.0, 1.0 - f32::EPSILON)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
