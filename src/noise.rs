//! Noise sources for terrain displacement.
//!
//! `NoiseContext` owns the permutation table of a classic 3D gradient noise.
//! The table is shuffled once on construction and never changes afterwards,
//! so a context can be shared by reference between any number of terrain
//! generations.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Half-width of the uniform range used by [`NoiseMode::Uncorrelated`].
pub const UNCORRELATED_AMPLITUDE: f32 = 0.35;

/// Selects where terrain heights come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoiseMode {
    /// Spatially smooth gradient noise.
    #[default]
    Coherent,
    /// Independent uniform draws per vertex, no spatial coherence.
    Uncorrelated,
}

#[derive(Clone)]
pub struct NoiseContext {
    perm: [u8; 512],
}

impl NoiseContext {
    /// Shuffle `0..=255` with `rng` and double the table for wraparound.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut base: Vec<u8> = (0..=255).collect();
        base.shuffle(rng);

        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = base[i & 255];
        }
        Self { perm }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(&mut StdRng::seed_from_u64(seed))
    }

    pub fn permutation(&self) -> &[u8; 512] {
        &self.perm
    }

    fn p(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    /// Gradient noise at `(x, y, z)`. Zero on every lattice point, roughly
    /// within [-1, 1] elsewhere.
    pub fn perlin(&self, x: f32, y: f32, z: f32) -> f32 {
        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let xi = (xf as i32 & 255) as usize;
        let yi = (yf as i32 & 255) as usize;
        let zi = (zf as i32 & 255) as usize;

        let (x, y, z) = (x - xf, y - yf, z - zf);
        let (u, v, w) = (fade(x), fade(y), fade(z));

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        lerp(
            lerp(
                lerp(
                    grad(self.perm[aa], x, y, z),
                    grad(self.perm[ba], x - 1.0, y, z),
                    u,
                ),
                lerp(
                    grad(self.perm[ab], x, y - 1.0, z),
                    grad(self.perm[bb], x - 1.0, y - 1.0, z),
                    u,
                ),
                v,
            ),
            lerp(
                lerp(
                    grad(self.perm[aa + 1], x, y, z - 1.0),
                    grad(self.perm[ba + 1], x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    grad(self.perm[ab + 1], x, y - 1.0, z - 1.0),
                    grad(self.perm[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }

    /// Raw noise value for one vertex in the given mode.
    pub fn sample<R: Rng + ?Sized>(&self, mode: NoiseMode, x: f32, y: f32, z: f32, rng: &mut R) -> f32 {
        match mode {
            NoiseMode::Coherent => self.perlin(x, y, z),
            NoiseMode::Uncorrelated => {
                rng.gen_range(-UNCORRELATED_AMPLITUDE..UNCORRELATED_AMPLITUDE)
            }
        }
    }
}

impl std::fmt::Debug for NoiseContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseContext")
            .field("perm", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

/// Smootherstep `6t^5 - 15t^4 + 10t^3`.
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
