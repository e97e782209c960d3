//! Skewed Student-t law with Normal fallback wrappers.
//!
//! Purpose
//! -------
//! Provide density, CDF, quantile, and sampling for the Fernández–Steel
//! skewed Student-t standardized to zero mean and unit variance (the `sstd`
//! family), located and scaled by `(mean, sd)`. Each operation comes in two
//! forms:
//!
//! - a fallible core (`dsstd`, `ln_dsstd`, `psstd`, `qsstd`, `rsstd`) that
//!   returns a [`SkewTFailure`] on bad parameters or non-finite output;
//! - a robust wrapper (`*_robust`) that never fails: on a core failure it
//!   emits a [`DistributionFallback`] warning through `tracing` and returns
//!   the Normal computation with the same `(mean, sd)`.
//!
//! Conventions
//! -----------
//! - `nu > 2` (finite variance), `xi > 0`, `sd > 0`.
//! - With `m1 = E|T|` of the unit-variance t, `mu = m1 (ξ − 1/ξ)` and
//!   `sigma = √((1 − m1²)(ξ² + 1/ξ²) + 2m1² − 1)` standardize the raw
//!   skewed law.
//! - The CDF and quantile split at the raw mode `z = 0`, where the CDF equals
//!   `1 / (1 + ξ²)`.
//!
//! Testing notes
//! -------------
//! - Unit tests check the density integrates to one with zero mean and unit
//!   variance, the quantile inverts the CDF, the symmetric case reduces to a
//!   unit-variance Student-t, and forced failures (ν = 1) fall back to the
//!   Normal result.
use std::fmt;

use rand::{Rng, distributions::Distribution};
use statrs::{
    distribution::{Continuous, ContinuousCDF, Normal, StudentsT},
    function::gamma::ln_gamma,
};

/// Reason a skewed-t routine could not produce a value.
#[derive(Debug, Clone, PartialEq)]
pub enum SkewTFailure {
    InvalidShape { nu: f64 },
    InvalidSkew { xi: f64 },
    InvalidScale { sd: f64 },
    InvalidProbability { p: f64 },
    Backend { text: String },
    NonFinite { value: f64 },
}

impl fmt::Display for SkewTFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkewTFailure::InvalidShape { nu } => write!(f, "degrees of freedom {nu} must be > 2"),
            SkewTFailure::InvalidSkew { xi } => write!(f, "skew {xi} must be finite and > 0"),
            SkewTFailure::InvalidScale { sd } => write!(f, "scale {sd} must be finite and > 0"),
            SkewTFailure::InvalidProbability { p } => {
                write!(f, "probability {p} must lie in [0, 1]")
            }
            SkewTFailure::Backend { text } => write!(f, "statistics backend: {text}"),
            SkewTFailure::NonFinite { value } => write!(f, "non-finite result {value}"),
        }
    }
}

impl std::error::Error for SkewTFailure {}

/// Which skewed-t operation fell back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Density,
    Cdf,
    Quantile,
    Sampling,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Density => "density",
            Operation::Cdf => "cdf",
            Operation::Quantile => "quantile",
            Operation::Sampling => "sampling",
        }
    }
}

/// Non-fatal record of a skewed-t failure recovered with the Normal law.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionFallback {
    pub operation: Operation,
    pub reason: SkewTFailure,
}

impl DistributionFallback {
    fn emit(&self) {
        tracing::warn!(
            operation = self.operation.as_str(),
            reason = %self.reason,
            "skewed-t routine failed; substituting normal distribution"
        );
    }
}

/// Precomputed standardization constants for one `(ν, ξ)`.
#[derive(Debug, Clone)]
struct StandardizedSkewT {
    t: StudentsT,
    xi: f64,
    /// `√(ν / (ν − 2))`: rescales a raw t draw to unit variance.
    s: f64,
    mu: f64,
    sigma: f64,
    g: f64,
}

impl StandardizedSkewT {
    fn new(nu: f64, xi: f64) -> Result<Self, SkewTFailure> {
        if nu.is_nan() || nu <= 2.0 {
            return Err(SkewTFailure::InvalidShape { nu });
        }
        if !xi.is_finite() || xi <= 0.0 {
            return Err(SkewTFailure::InvalidSkew { xi });
        }
        let t = StudentsT::new(0.0, 1.0, nu)
            .map_err(|e| SkewTFailure::Backend { text: e.to_string() })?;

        let ln_ratio = ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu);
        let m1 = 2.0 * (nu - 2.0).sqrt() * ln_ratio.exp()
            / (std::f64::consts::PI.sqrt() * (nu - 1.0));
        let mu = m1 * (xi - 1.0 / xi);
        let sigma2 = (1.0 - m1 * m1) * (xi * xi + 1.0 / (xi * xi)) + 2.0 * m1 * m1 - 1.0;
        let sigma = sigma2.sqrt();
        if !m1.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
            return Err(SkewTFailure::NonFinite { value: sigma2 });
        }
        Ok(StandardizedSkewT {
            t,
            xi,
            s: (nu / (nu - 2.0)).sqrt(),
            mu,
            sigma,
            g: 2.0 / (xi + 1.0 / xi),
        })
    }

    fn raw(&self, x: f64) -> f64 {
        x * self.sigma + self.mu
    }

    fn xi_for(&self, z: f64) -> f64 {
        if z >= 0.0 { self.xi } else { 1.0 / self.xi }
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        let z = self.raw(x);
        let arg = z * self.s / self.xi_for(z);
        self.g.ln() + self.s.ln() + self.t.ln_pdf(arg) + self.sigma.ln()
    }

    /// Unit-variance t CDF.
    fn pstd(&self, q: f64) -> f64 {
        self.t.cdf(q * self.s)
    }

    /// Unit-variance t quantile.
    fn qstd(&self, p: f64) -> f64 {
        self.t.inverse_cdf(p) / self.s
    }

    fn cdf(&self, x: f64) -> f64 {
        let z = self.raw(x);
        if z >= 0.0 {
            1.0 - self.g * self.xi * self.pstd(-z / self.xi)
        } else {
            self.g / self.xi * self.pstd(z * self.xi)
        }
    }

    fn quantile(&self, p: f64) -> f64 {
        let split = 1.0 / (1.0 + self.xi * self.xi);
        let z = if p < split {
            self.qstd(p * self.xi / self.g) / self.xi
        } else {
            -self.xi * self.qstd((1.0 - p) / (self.g * self.xi))
        };
        (z - self.mu) / self.sigma
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let w = self.xi / (self.xi + 1.0 / self.xi);
        let u: f64 = rng.gen::<f64>() - w;
        let sign = if u < 0.0 { -1.0 } else { 1.0 };
        let xi_pow = if u < 0.0 { 1.0 / self.xi } else { self.xi };
        let r = self.t.sample(rng) / self.s;
        let raw = -r.abs() / xi_pow * sign;
        (raw - self.mu) / self.sigma
    }
}

fn check_scale(sd: f64) -> Result<(), SkewTFailure> {
    if !sd.is_finite() || sd <= 0.0 {
        return Err(SkewTFailure::InvalidScale { sd });
    }
    Ok(())
}

fn finite(value: f64) -> Result<f64, SkewTFailure> {
    if value.is_nan() {
        return Err(SkewTFailure::NonFinite { value });
    }
    Ok(value)
}

// ---- Fallible core ---------------------------------------------------------

/// Log-density at `x`.
pub fn ln_dsstd(x: f64, mean: f64, sd: f64, nu: f64, xi: f64) -> Result<f64, SkewTFailure> {
    check_scale(sd)?;
    let law = StandardizedSkewT::new(nu, xi)?;
    let value = law.ln_pdf((x - mean) / sd) - sd.ln();
    if !value.is_finite() {
        return Err(SkewTFailure::NonFinite { value });
    }
    Ok(value)
}

/// Density at `x`.
pub fn dsstd(x: f64, mean: f64, sd: f64, nu: f64, xi: f64) -> Result<f64, SkewTFailure> {
    ln_dsstd(x, mean, sd, nu, xi).map(f64::exp)
}

/// CDF at `q`.
pub fn psstd(q: f64, mean: f64, sd: f64, nu: f64, xi: f64) -> Result<f64, SkewTFailure> {
    check_scale(sd)?;
    let law = StandardizedSkewT::new(nu, xi)?;
    finite(law.cdf((q - mean) / sd).clamp(0.0, 1.0))
}

/// Quantile at probability `p`. `p = 0` and `p = 1` map to `∓∞`.
pub fn qsstd(p: f64, mean: f64, sd: f64, nu: f64, xi: f64) -> Result<f64, SkewTFailure> {
    check_scale(sd)?;
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return Err(SkewTFailure::InvalidProbability { p });
    }
    let law = StandardizedSkewT::new(nu, xi)?;
    if p == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }
    let value = mean + sd * law.quantile(p);
    if !value.is_finite() {
        return Err(SkewTFailure::NonFinite { value });
    }
    Ok(value)
}

/// `n` independent draws.
pub fn rsstd<R: Rng + ?Sized>(
    rng: &mut R, n: usize, mean: f64, sd: f64, nu: f64, xi: f64,
) -> Result<Vec<f64>, SkewTFailure> {
    check_scale(sd)?;
    let law = StandardizedSkewT::new(nu, xi)?;
    let draws: Vec<f64> = (0..n).map(|_| mean + sd * law.draw(rng)).collect();
    if let Some(&value) = draws.iter().find(|v| !v.is_finite()) {
        return Err(SkewTFailure::NonFinite { value });
    }
    Ok(draws)
}

// ---- Robust wrappers -------------------------------------------------------

fn fall_back(operation: Operation, reason: SkewTFailure) {
    DistributionFallback { operation, reason }.emit();
}

fn normal(mean: f64, sd: f64) -> Option<Normal> {
    match Normal::new(mean, sd) {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::error!(mean, sd, error = %e, "normal fallback unavailable");
            None
        }
    }
}

/// Log-density that never fails; Normal log-density on fallback.
pub fn ln_dsstd_robust(x: f64, mean: f64, sd: f64, nu: f64, xi: f64) -> f64 {
    match ln_dsstd(x, mean, sd, nu, xi) {
        Ok(v) => v,
        Err(reason) => {
            fall_back(Operation::Density, reason);
            normal(mean, sd).map_or(f64::NAN, |n| n.ln_pdf(x))
        }
    }
}

/// Density that never fails; Normal density on fallback.
pub fn dsstd_robust(x: f64, mean: f64, sd: f64, nu: f64, xi: f64) -> f64 {
    match dsstd(x, mean, sd, nu, xi) {
        Ok(v) => v,
        Err(reason) => {
            fall_back(Operation::Density, reason);
            normal(mean, sd).map_or(f64::NAN, |n| n.pdf(x))
        }
    }
}

/// CDF that never fails; Normal CDF on fallback.
pub fn psstd_robust(q: f64, mean: f64, sd: f64, nu: f64, xi: f64) -> f64 {
    match psstd(q, mean, sd, nu, xi) {
        Ok(v) => v,
        Err(reason) => {
            fall_back(Operation::Cdf, reason);
            normal(mean, sd).map_or(f64::NAN, |n| n.cdf(q))
        }
    }
}

/// Quantile that never fails; Normal quantile on fallback.
pub fn qsstd_robust(p: f64, mean: f64, sd: f64, nu: f64, xi: f64) -> f64 {
    match qsstd(p, mean, sd, nu, xi) {
        Ok(v) => v,
        Err(reason) => {
            fall_back(Operation::Quantile, reason);
            if p.is_nan() || !(0.0..=1.0).contains(&p) {
                return f64::NAN;
            }
            normal(mean, sd).map_or(f64::NAN, |n| n.inverse_cdf(p))
        }
    }
}

/// Sampling that never fails; Normal draws on fallback.
pub fn rsstd_robust<R: Rng + ?Sized>(
    rng: &mut R, n: usize, mean: f64, sd: f64, nu: f64, xi: f64,
) -> Vec<f64> {
    match rsstd(rng, n, mean, sd, nu, xi) {
        Ok(v) => v,
        Err(reason) => {
            fall_back(Operation::Sampling, reason);
            match normal(mean, sd) {
                Some(law) => (0..n).map(|_| law.sample(rng)).collect(),
                None => vec![f64::NAN; n],
            }
        }
    }
}
