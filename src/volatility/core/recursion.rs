//! Variance recursion — one-step kernel and full in-sample filter.
//!
//! Purpose
//! -------
//! Compute conditional variances for a return series under validated
//! [`GarchParams`]. The one-step kernel [`next_variance`] is shared by the
//! filter, the forecaster, and the path simulator so that all three advance
//! the state identically.
//!
//! Key behaviors
//! -------------
//! - [`next_variance`] maps `(σ²ₜ₋₁, εₜ₋₁)` to `σ²ₜ` for every variant and
//!   applies the [`VarianceGuards`] before returning.
//! - [`compute_variance`] runs the filter over a series from either an
//!   [`Init`] policy or a [`WarmStart`], returning a [`VarianceSequence`]
//!   with one variance and one residual per observation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned variance is finite and strictly positive. Additive and
//!   Exponential variants floor σ² at `guards.min`; Threshold floors σ at
//!   `guards.min`.
//! - `sigma2[0]` is the initial variance (policy value, or the warm start
//!   advanced one step); `sigma2[t] = next(sigma2[t−1], resid[t−1])`.
//! - `resid[t] = r_t − μ`.
//!
//! Conventions
//! -----------
//! - Exponential: `ln σ²ₜ = ω + β ln σ²ₜ₋₁ + α(|zₜ₋₁| − E|z|) + γ zₜ₋₁`
//!   with `zₜ₋₁ = εₜ₋₁ / σₜ₋₁`; `E|z|` comes from the innovation law.
//! - Threshold: `σₜ = ω + α|εₜ₋₁| + η·1[εₜ₋₁ < 0]|εₜ₋₁| + β σₜ₋₁`.
//!
//! Testing notes
//! -------------
//! - Unit tests compare each kernel against hand-computed updates and check
//!   the warm-start offset of the filter.
//! - Property tests check the floor invariant over random finite parameters
//!   and shocks, and fuzz the Exponential variant's unconstrained γ.
use ndarray::{Array1, ArrayView1};

use crate::volatility::{
    core::{
        guards::VarianceGuards,
        init::{Init, WarmStart},
        params::GarchParams,
        variant::ModelVariant,
    },
    errors::{GarchError, GarchResult},
};

/// Where a filter starts: a fresh policy or a continued state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Start {
    Fresh(Init),
    Warm(WarmStart),
}

impl Default for Start {
    fn default() -> Self {
        Start::Fresh(Init::default())
    }
}

/// Advance the conditional variance by one step.
///
/// `abs_moment` is `E|z|` of the innovation law; only the Exponential variant
/// reads it.
#[inline]
pub fn next_variance(
    params: &GarchParams, abs_moment: f64, guards: &VarianceGuards, sigma2_prev: f64,
    resid_prev: f64,
) -> f64 {
    let GarchParams { omega, alpha, gamma, beta, .. } = *params;
    let shock2 = resid_prev * resid_prev;
    let negative = resid_prev < 0.0;
    match params.variant {
        ModelVariant::Standard => guards.clamp(omega + alpha * shock2 + beta * sigma2_prev),
        ModelVariant::Gjr => {
            let leverage = if negative { gamma * shock2 } else { 0.0 };
            guards.clamp(omega + alpha * shock2 + leverage + beta * sigma2_prev)
        }
        ModelVariant::Exponential => {
            let z = resid_prev / sigma2_prev.sqrt();
            let ln_sigma2 =
                omega + beta * sigma2_prev.ln() + alpha * (z.abs() - abs_moment) + gamma * z;
            guards.clamp(ln_sigma2.exp())
        }
        ModelVariant::Threshold => {
            let shock = resid_prev.abs();
            let leverage = if negative { gamma * shock } else { 0.0 };
            let sigma = guards.clamp_sd(omega + alpha * shock + leverage + beta * sigma2_prev.sqrt());
            sigma * sigma
        }
    }
}

/// Guard an initial variance the way the variant guards its state.
#[inline]
pub fn guard_initial(variant: ModelVariant, guards: &VarianceGuards, sigma2: f64) -> f64 {
    match variant {
        ModelVariant::Threshold => {
            let sigma = guards.clamp_sd(sigma2.max(0.0).sqrt());
            sigma * sigma
        }
        _ => guards.clamp(sigma2),
    }
}

/// VarianceSequence — conditional variances and residuals of one filter run.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceSequence {
    /// `σ²ₜ`, one per observation.
    pub sigma2: Array1<f64>,
    /// `εₜ = rₜ − μ`, one per observation.
    pub resid: Array1<f64>,
}

impl VarianceSequence {
    pub fn len(&self) -> usize {
        self.sigma2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sigma2.is_empty()
    }

    /// Conditional volatilities `σₜ`.
    pub fn volatility(&self) -> Array1<f64> {
        self.sigma2.mapv(f64::sqrt)
    }

    /// Standardized residuals `zₜ = εₜ / σₜ`.
    pub fn standardized(&self) -> Array1<f64> {
        &self.resid / &self.volatility()
    }

    /// Final `(σ², ε, μ)` state for continuing the filter.
    ///
    /// Errors
    /// ------
    /// - `GarchError::EmptySeries` for an empty sequence.
    /// - `GarchError::InvalidWarmStart` if the final state is not finite.
    pub fn last_state(&self, mu: f64) -> GarchResult<WarmStart> {
        let last = self.len().checked_sub(1).ok_or(GarchError::EmptySeries)?;
        WarmStart::new(self.sigma2[last], self.resid[last], mu)
    }
}

/// Run the variance filter over `returns`.
///
/// Returns one variance and one residual per observation. A [`Start::Fresh`]
/// policy seeds `sigma2[0]` directly; a [`Start::Warm`] state is advanced one
/// step with [`next_variance`] to produce `sigma2[0]`.
pub fn compute_variance(
    returns: ArrayView1<f64>, params: &GarchParams, abs_moment: f64, start: &Start,
    guards: &VarianceGuards,
) -> VarianceSequence {
    let n = returns.len();
    let resid = returns.mapv(|r| r - params.mu);
    let mut sigma2 = Array1::zeros(n);
    if n == 0 {
        return VarianceSequence { sigma2, resid };
    }

    sigma2[0] = match *start {
        Start::Fresh(init) => {
            guard_initial(params.variant, guards, init.resolve(returns, params.mu))
        }
        Start::Warm(warm) => next_variance(params, abs_moment, guards, warm.sigma2, warm.resid),
    };
    for t in 1..n {
        sigma2[t] = next_variance(params, abs_moment, guards, sigma2[t - 1], resid[t - 1]);
    }
    VarianceSequence { sigma2, resid }
}
