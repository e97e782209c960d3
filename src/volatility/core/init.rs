//! Initial-state policies for the variance recursion.
//!
//! Purpose
//! -------
//! Decide how `σ²₀` is seeded before the first observation. A fresh fit uses
//! an [`Init`] policy; a continuation from a fitted state (forecasting, path
//! simulation, rolling windows) uses a [`WarmStart`] carrying the last
//! `(σ², ε, μ)` triple.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Init::Fixed(v)` requires `v` finite and `> 0`.
//! - A [`WarmStart`] has a finite, strictly positive variance and finite
//!   residual and mean.
//!
//! Conventions
//! -----------
//! - `SampleVariance` resolves to the mean squared residual around μ of the
//!   series being filtered, so it varies with μ during estimation.
//! - Resolved initial variances are passed through the variance guards by the
//!   recursion, not here.
use ndarray::ArrayView1;

use crate::volatility::errors::{GarchError, GarchResult};

/// Init — policy for the initial conditional variance of a fresh filter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Init {
    /// Mean squared residual `(1/n) Σ (r_t − μ)²`.
    #[default]
    SampleVariance,
    /// A strictly positive fixed variance.
    Fixed(f64),
}

impl Init {
    pub fn sample_variance() -> Self {
        Init::SampleVariance
    }

    /// Validated fixed initial variance.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidInitFixed` unless `value` is finite and `> 0`.
    pub fn fixed(value: f64) -> GarchResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(GarchError::InvalidInitFixed { value });
        }
        Ok(Init::Fixed(value))
    }

    /// Resolve the policy against a return series and mean μ.
    pub fn resolve(&self, returns: ArrayView1<f64>, mu: f64) -> f64 {
        match *self {
            Init::SampleVariance => {
                if returns.is_empty() {
                    return f64::NAN;
                }
                returns.iter().map(|r| (r - mu).powi(2)).sum::<f64>() / returns.len() as f64
            }
            Init::Fixed(v) => v,
        }
    }
}

/// WarmStart — last known `(σ², ε, μ)` state of a filter.
///
/// The next conditional variance is `next(sigma2, resid)`; `mean` is carried
/// so a continuation can rebuild returns as `μ + ε`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarmStart {
    /// Conditional variance at the last observation.
    pub sigma2: f64,
    /// Residual `r − μ` at the last observation.
    pub resid: f64,
    /// Conditional mean at the last observation.
    pub mean: f64,
}

impl WarmStart {
    /// Validated warm start.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidWarmStart { field, .. }` naming the first invalid
    ///   field (`"sigma2"` must be finite and `> 0`; `"resid"` and `"mean"`
    ///   must be finite).
    pub fn new(sigma2: f64, resid: f64, mean: f64) -> GarchResult<Self> {
        if !sigma2.is_finite() || sigma2 <= 0.0 {
            return Err(GarchError::InvalidWarmStart { field: "sigma2", value: sigma2 });
        }
        if !resid.is_finite() {
            return Err(GarchError::InvalidWarmStart { field: "resid", value: resid });
        }
        if !mean.is_finite() {
            return Err(GarchError::InvalidWarmStart { field: "mean", value: mean });
        }
        Ok(WarmStart { sigma2, resid, mean })
    }

    /// Volatility `√σ²` at the last observation.
    pub fn sigma(&self) -> f64 {
        self.sigma2.sqrt()
    }
}
