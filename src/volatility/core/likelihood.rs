//! Likelihood engine — total log-likelihood and information criteria.
//!
//! Purpose
//! -------
//! Aggregate per-observation log-likelihood contributions
//! `ln f(zₜ) − ½ ln σ²ₜ` with `zₜ = εₜ / σₜ`, and derive AIC/BIC from the
//! total.
//!
//! Conventions
//! -----------
//! - `f` is the standardized innovation density of the active
//!   [`Innovation`] law.
//! - `k` counts every estimated parameter (variant coefficients plus any
//!   estimated skewed-t shape and skew); `n` is the series length.
//! - AIC = −2·LL + 2k and BIC = −2·LL + k·ln n.
use crate::volatility::core::{innovations::Innovation, recursion::VarianceSequence};

/// Finite stand-in for `-∞` handed to optimizers at infeasible points.
pub const INFEASIBLE_LOGLIK: f64 = -1e10;

/// Total log-likelihood of a filtered series.
///
/// Returns `-∞` when any term is not finite so that optimizers treat the
/// point as infeasible.
pub fn log_likelihood(seq: &VarianceSequence, law: &Innovation) -> f64 {
    let mut total = 0.0;
    for (&s2, &e) in seq.sigma2.iter().zip(seq.resid.iter()) {
        total += law.ln_density(e / s2.sqrt()) - 0.5 * s2.ln();
    }
    if total.is_finite() { total } else { f64::NEG_INFINITY }
}

/// InfoCriteria — AIC, BIC and the log-likelihood they derive from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfoCriteria {
    pub aic: f64,
    pub bic: f64,
    pub log_likelihood: f64,
}

impl InfoCriteria {
    /// Criteria for a fit with `k` estimated parameters on `n` observations.
    pub fn new(log_likelihood: f64, k: usize, n: usize) -> Self {
        let k = k as f64;
        InfoCriteria {
            aic: -2.0 * log_likelihood + 2.0 * k,
            bic: -2.0 * log_likelihood + k * (n as f64).ln(),
            log_likelihood,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::{
        guards::VarianceGuards,
        init::Init,
        params::GarchParams,
        recursion::{Start, compute_variance},
        variant::ModelVariant,
    };
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::f64::consts::PI;

    #[test]
    // Purpose
    // -------
    // The Normal total matches the Gaussian closed form.
    //
    // Given
    // -----
    // - σ² = [1, 4], ε = [0.5, -1].
    //
    // Expect
    // ------
    // - Σ[-½ ln 2π − ½ z² − ½ ln σ²] with z = [0.5, -0.5].
    fn normal_total_matches_closed_form() {
        let seq = VarianceSequence { sigma2: array![1.0, 4.0], resid: array![0.5, -1.0] };
        let expected = -(2.0 * PI).ln() - 0.5 * (0.25 + 0.25) - 0.5 * 4f64.ln();
        assert_relative_eq!(log_likelihood(&seq, &Innovation::Normal), expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Information criteria use the documented penalties.
    //
    // Given
    // -----
    // - LL = -100, k = 4, n = 500.
    //
    // Expect
    // ------
    // - AIC = 208, BIC = 200 + 4 ln 500.
    fn info_criteria_penalties() {
        let ic = InfoCriteria::new(-100.0, 4, 500);
        assert_relative_eq!(ic.aic, 208.0);
        assert_relative_eq!(ic.bic, 200.0 + 4.0 * 500f64.ln());
        assert_eq!(ic.log_likelihood, -100.0);
    }

    #[test]
    // Purpose
    // -------
    // The likelihood is invariant to a transform round trip.
    //
    // Given
    // -----
    // - GJR parameters p, a short return series, and p' = from_theta(to_theta(p)).
    //
    // Expect
    // ------
    // - LL(p) ≈ LL(p') to 1e-9 relative.
    fn likelihood_invariant_to_transform_round_trip() {
        let g = VarianceGuards::default();
        let r = array![0.004, -0.012, 0.007, -0.002, 0.015, -0.009, 0.001, 0.003];
        let p = GarchParams::new(ModelVariant::Gjr, 5e-4, 3e-6, 0.05, 0.07, 0.88).unwrap();
        let back = GarchParams::from_theta(p.variant, p.to_theta().view()).unwrap();
        let start = Start::Fresh(Init::SampleVariance);
        let ez = Innovation::Normal.abs_moment().unwrap();

        let ll = log_likelihood(&compute_variance(r.view(), &p, ez, &start, &g), &Innovation::Normal);
        let ll_back =
            log_likelihood(&compute_variance(r.view(), &back, ez, &start, &g), &Innovation::Normal);
        assert!(ll.is_finite());
        assert_relative_eq!(ll, ll_back, max_relative = 1e-9);
    }
}
