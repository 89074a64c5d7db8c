use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::TAU;

/// Norm below which a sampled Gaussian triple is considered degenerate
/// and redrawn.
const MIN_NORM: f64 = 1e-12;

/// Seedable source of the random quantities the vertex generator needs.
///
/// Wraps a single `StdRng`; the process holds one of these and threads it
/// mutably through every sampling call, so reseeding takes effect for all
/// subsequent draws at once.
#[derive(Debug)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler from an explicit seed, or from entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        Self { rng }
    }

    /// Reseed the generator in place (the `/seed` configuration command).
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SeedableRng::seed_from_u64(seed);
    }

    /// A point uniform in *area* over a disc of the given radius, centred
    /// on the origin.
    ///
    /// Uses the inverse-CDF construction `r = radius * sqrt(u)` so the
    /// density is uniform per unit area, not per unit radius.
    pub fn on_disc(&mut self, radius: f64) -> Result<(f64, f64)> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "disc radius must be finite and > 0, got {radius}"
            )));
        }
        let r = radius * self.rng.random::<f64>().sqrt();
        let theta = TAU * self.rng.random::<f64>();
        Ok((r * theta.cos(), r * theta.sin()))
    }

    /// A uniform scalar in `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> Result<f64> {
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::InvalidParam(format!(
                "interval bounds must be finite, got [{low}, {high})"
            )));
        }
        if low >= high {
            return Err(Error::InvalidParam(format!(
                "interval must satisfy low < high, got [{low}, {high})"
            )));
        }
        Ok(self.rng.random_range(low..high))
    }

    /// A direction uniform over the unit sphere.
    ///
    /// Normalizes a triple of independent standard Gaussians; the result has
    /// unit length to floating-point accuracy.
    pub fn isotropic_direction(&mut self) -> [f64; 3] {
        loop {
            let v = [self.gaussian(), self.gaussian(), self.gaussian()];
            let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            if norm > MIN_NORM {
                return [v[0] / norm, v[1] / norm, v[2] / norm];
            }
        }
    }

    /// One standard-normal variate via Box–Muller.
    fn gaussian(&mut self) -> f64 {
        // 1 - u keeps the argument of ln strictly positive.
        let u = 1.0 - self.rng.random::<f64>();
        let v = self.rng.random::<f64>();
        (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
    }
}
