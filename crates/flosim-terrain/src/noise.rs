//! Seeded multi-octave value noise.
//!
//! Each octave lays a lattice of uniform random values over the grid and
//! samples it with smoothstep-weighted bilinear interpolation. Octave `k`
//! has a lattice period of `period / 2^k` cells and weight
//! `persistence^k`; the weighted sum is normalised to `[0, 1)` and scaled.
//!
//! Lattice spacing is the same along both axes, so a non-square grid
//! shows the same feature size horizontally and vertically.
//!
//! Respects the determinism contract: all randomness comes from a
//! `ChaCha8Rng` seeded with `seed`, so equal parameters give bit-identical
//! grids on every platform.
//!
//! Constructed via the builder pattern: [`NoiseTerrain::builder`].

use flosim_core::Grid;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::TerrainError;
use crate::source::TerrainSource;

/// Default output range, `[0, 128)`.
pub const DEFAULT_SCALE: f64 = 128.0;

/// A deterministic value-noise terrain generator.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseTerrain {
    scale: f64,
    seed: u64,
    octaves: u32,
    persistence: f64,
    period: f64,
}

/// Builder for [`NoiseTerrain`].
///
/// No field is required; every setter overrides a default.
#[derive(Clone, Debug)]
pub struct NoiseTerrainBuilder {
    scale: f64,
    seed: u64,
    octaves: u32,
    persistence: f64,
    period: f64,
}

impl NoiseTerrain {
    /// Create a new builder for configuring a `NoiseTerrain`.
    pub fn builder() -> NoiseTerrainBuilder {
        NoiseTerrainBuilder {
            scale: DEFAULT_SCALE,
            seed: 0,
            octaves: 4,
            persistence: 0.5,
            period: 16.0,
        }
    }

    /// Generator with the given output scale and seed, defaults otherwise.
    pub fn new(scale: f64, seed: u64) -> Result<Self, TerrainError> {
        Self::builder().scale(scale).seed(seed).build()
    }

    /// Upper bound (exclusive) of generated values.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of octaves.
    pub fn octaves(&self) -> u32 {
        self.octaves
    }
}

impl NoiseTerrainBuilder {
    /// Set the output scale (default: 128). Values fall in `[0, scale)`.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the RNG seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of octaves (default: 4). Must be >= 1.
    pub fn octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Set the per-octave weight decay (default: 0.5). Must be in `(0, 1]`.
    pub fn persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Set the lattice period of the first octave in cells (default: 16).
    /// Must be finite and >= 1.
    pub fn period(mut self, period: f64) -> Self {
        self.period = period;
        self
    }

    /// Build the generator, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidParameter`] if:
    /// - `scale` is not finite or not > 0
    /// - `octaves` is zero
    /// - `persistence` is not in `(0, 1]`
    /// - `period` is not finite or < 1
    pub fn build(self) -> Result<NoiseTerrain, TerrainError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TerrainError::InvalidParameter {
                reason: format!("scale must be finite and > 0, got {}", self.scale),
            });
        }
        if self.octaves == 0 {
            return Err(TerrainError::InvalidParameter {
                reason: "octaves must be at least 1".to_string(),
            });
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(TerrainError::InvalidParameter {
                reason: format!("persistence must be in (0, 1], got {}", self.persistence),
            });
        }
        if !(self.period.is_finite() && self.period >= 1.0) {
            return Err(TerrainError::InvalidParameter {
                reason: format!("period must be finite and >= 1, got {}", self.period),
            });
        }
        Ok(NoiseTerrain {
            scale: self.scale,
            seed: self.seed,
            octaves: self.octaves,
            persistence: self.persistence,
            period: self.period,
        })
    }
}

/// Random values at integer lattice points.
struct Lattice {
    width: usize,
    values: Vec<f64>,
}

impl Lattice {
    fn random(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Self {
        let values = (0..width * height).map(|_| rng.random::<f64>()).collect();
        Self { width, values }
    }

    fn at(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// Smoothstep-bilinear sample at lattice coordinates `(fx, fy)`.
    fn sample(&self, fx: f64, fy: f64) -> f64 {
        let (x0, y0) = (fx.floor(), fy.floor());
        let (tx, ty) = (smoothstep(fx - x0), smoothstep(fy - y0));
        let (x0, y0) = (x0 as usize, y0 as usize);
        let top = lerp(self.at(x0, y0), self.at(x0 + 1, y0), tx);
        let bottom = lerp(self.at(x0, y0 + 1), self.at(x0 + 1, y0 + 1), tx);
        lerp(top, bottom, ty)
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl TerrainSource for NoiseTerrain {
    fn generate(&self, width: usize, height: usize) -> Result<Grid<f64>, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::EmptyGrid);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut sum = vec![0.0; width * height];
        let mut amplitude = 1.0;
        let mut total_amplitude = 0.0;

        for octave in 0..self.octaves {
            let period = (self.period / 2f64.powi(octave as i32)).max(1.0);
            // One extra lattice point past the last sampled coordinate.
            let lw = ((width - 1) as f64 / period).floor() as usize + 2;
            let lh = ((height - 1) as f64 / period).floor() as usize + 2;
            let lattice = Lattice::random(&mut rng, lw, lh);
            for (i, s) in sum.iter_mut().enumerate() {
                let (x, y) = (i % width, i / width);
                *s += amplitude * lattice.sample(x as f64 / period, y as f64 / period);
            }
            total_amplitude += amplitude;
            amplitude *= self.persistence;
        }

        debug!(
            "generated {width}x{height} noise terrain (seed {}, {} octaves)",
            self.seed, self.octaves
        );
        let ceiling = self.scale.next_down();
        Ok(Grid::from_fn(width, height, |x, y| {
            (sum[y * width + x] / total_amplitude * self.scale).min(ceiling)
        }))
    }
}
