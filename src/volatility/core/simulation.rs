//! Path simulator — deterministic multi-step paths from supplied innovations.
//!
//! Purpose
//! -------
//! Generate `(σ², ε, r)` paths that continue a fitted state, driven by an
//! innovation sequence the caller provides. Innovations may be IID draws from
//! the fitted law ([`draw_innovations`]) or residuals produced elsewhere; the
//! simulator never draws internally.
//!
//! Key behaviors
//! -------------
//! - The first step starts at `σ²₀ = next(warm.sigma2, warm.resid)`.
//! - At step `t`: `εₜ = σₜ zₜ`, `rₜ = μ + εₜ`, then
//!   `σ²ₜ₊₁ = next(σ²ₜ, εₜ)` with the shared kernel and guards.
//! - Only the first `horizon` innovations are consumed.
//!
//! Invariants & assumptions
//! ------------------------
//! - `horizon ≥ 1`, `innovations.len() ≥ horizon`, and every consumed
//!   innovation is finite; violations are errors, never truncation.
//! - Given identical parameters, warm start and innovations, the path is
//!   bit-for-bit reproducible.
use ndarray::{Array1, ArrayView1};
use rand::{SeedableRng, rngs::StdRng};

use crate::volatility::{
    core::{
        guards::VarianceGuards, init::WarmStart, innovations::Innovation, params::GarchParams,
        recursion::next_variance,
    },
    errors::{GarchError, GarchResult},
};

/// One simulated `(σ², ε, r)` triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub sigma2: f64,
    pub resid: f64,
    pub ret: f64,
}

/// SimulatedPath — conditional variances, residuals and returns of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    pub sigma2: Array1<f64>,
    pub resid: Array1<f64>,
    pub returns: Array1<f64>,
}

impl SimulatedPath {
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Per-step triples in time order.
    pub fn steps(&self) -> impl Iterator<Item = PathStep> + '_ {
        self.sigma2.iter().zip(self.resid.iter()).zip(self.returns.iter()).map(
            |((&sigma2, &resid), &ret)| PathStep { sigma2, resid, ret },
        )
    }

    pub fn volatility(&self) -> Array1<f64> {
        self.sigma2.mapv(f64::sqrt)
    }

    /// Mean absolute difference of the return sequences of two paths over
    /// their common length.
    pub fn mean_abs_diff(&self, other: &SimulatedPath) -> f64 {
        let n = self.len().min(other.len());
        if n == 0 {
            return 0.0;
        }
        self.returns.iter().zip(other.returns.iter()).map(|(a, b)| (a - b).abs()).sum::<f64>()
            / n as f64
    }
}

/// Check horizon and innovations before any path is generated.
///
/// Errors
/// ------
/// - `GarchError::InvalidHorizon` when `horizon == 0`.
/// - `GarchError::InnovationsTooShort` when `innovations.len() < horizon`.
/// - `GarchError::NonFiniteInnovation` for the first consumed NaN/±∞.
pub fn validate_innovations(innovations: ArrayView1<f64>, horizon: usize) -> GarchResult<()> {
    if horizon == 0 {
        return Err(GarchError::InvalidHorizon { horizon });
    }
    if innovations.len() < horizon {
        return Err(GarchError::InnovationsTooShort { len: innovations.len(), horizon });
    }
    for (index, &value) in innovations.iter().take(horizon).enumerate() {
        if !value.is_finite() {
            return Err(GarchError::NonFiniteInnovation { index, value });
        }
    }
    Ok(())
}

/// Simulate `horizon` steps continuing from `warm`.
///
/// Errors
/// ------
/// - See [`validate_innovations`].
pub fn simulate_path(
    params: &GarchParams, abs_moment: f64, guards: &VarianceGuards, warm: &WarmStart,
    innovations: ArrayView1<f64>, horizon: usize,
) -> GarchResult<SimulatedPath> {
    validate_innovations(innovations, horizon)?;

    let mut sigma2 = Array1::zeros(horizon);
    let mut resid = Array1::zeros(horizon);
    let mut returns = Array1::zeros(horizon);

    let mut s2 = next_variance(params, abs_moment, guards, warm.sigma2, warm.resid);
    for t in 0..horizon {
        let e = s2.sqrt() * innovations[t];
        sigma2[t] = s2;
        resid[t] = e;
        returns[t] = params.mu + e;
        s2 = next_variance(params, abs_moment, guards, s2, e);
    }
    Ok(SimulatedPath { sigma2, resid, returns })
}

/// `n` IID standardized innovations from `law`, seeded for reproducibility.
///
/// Skewed-t draws go through the robust sampler, so a failing law yields
/// Normal draws and a logged warning.
pub fn draw_innovations(law: &Innovation, n: usize, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array1::from(law.sample(&mut rng, n))
}
