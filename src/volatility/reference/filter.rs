//! Reference filter — slice-based variance recursion and likelihood.
//!
//! Written independently of `volatility::core::recursion` so that agreement
//! between the two backends is evidence, not tautology. Only the guard
//! bounds and the innovation laws are shared.
//!
//! Conventions
//! -----------
//! - Coefficients are held in plain [`Coefficients`]; `gamma` is γ for GJR and
//!   Exponential, η for Threshold, and ignored for Standard.
//! - `sigma2[0]` is the initial variance; `sigma2[t]` follows from
//!   `(sigma2[t−1], resid[t−1])`.
//! - Threshold runs in σ and floors σ; every other variant floors σ².
use crate::volatility::core::{
    guards::VarianceGuards, init::Init, innovations::Innovation, params::GarchParams,
    variant::ModelVariant,
};

/// Plain coefficient record used by the reference code paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub mu: f64,
    pub omega: f64,
    pub alpha: f64,
    pub gamma: f64,
    pub beta: f64,
}

impl Coefficients {
    pub fn from_params(params: &GarchParams) -> Self {
        Coefficients {
            mu: params.mu,
            omega: params.omega,
            alpha: params.alpha,
            gamma: params.gamma,
            beta: params.beta,
        }
    }

    /// Whether the coefficients lie in the variant's estimation domain.
    pub fn in_domain(&self, variant: ModelVariant) -> bool {
        let Coefficients { mu, omega, alpha, gamma, beta } = *self;
        if ![mu, omega, alpha, gamma, beta].iter().all(|v| v.is_finite()) {
            return false;
        }
        if !(0.0..1.0).contains(&beta) {
            return false;
        }
        match variant {
            ModelVariant::Exponential => true,
            _ => omega > 0.0 && alpha > 0.0 && alpha < 1.0 && alpha + beta < 1.0,
        }
    }
}

/// Filtered variances and residuals in plain vectors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filtered {
    pub sigma2: Vec<f64>,
    pub resid: Vec<f64>,
}

fn floor_variance(guards: &VarianceGuards, v: f64) -> f64 {
    if v.is_nan() { guards.min } else { v.max(guards.min).min(guards.max) }
}

fn floor_sd(guards: &VarianceGuards, s: f64) -> f64 {
    if s.is_nan() { guards.min } else { s.max(guards.min).min(guards.max.sqrt()) }
}

/// One recursion step from `(s2, e)` at `t − 1` to `σ²ₜ`.
pub fn step(
    variant: ModelVariant, c: &Coefficients, ez: f64, guards: &VarianceGuards, s2: f64, e: f64,
) -> f64 {
    let neg = if e < 0.0 { 1.0 } else { 0.0 };
    match variant {
        ModelVariant::Standard => floor_variance(guards, c.omega + c.alpha * e * e + c.beta * s2),
        ModelVariant::Gjr => floor_variance(
            guards,
            c.omega + (c.alpha + c.gamma * neg) * e * e + c.beta * s2,
        ),
        ModelVariant::Exponential => {
            let sd = s2.sqrt();
            let z = e / sd;
            let log_var = c.omega + c.beta * s2.ln() + c.alpha * (z.abs() - ez) + c.gamma * z;
            floor_variance(guards, log_var.exp())
        }
        ModelVariant::Threshold => {
            let sd = floor_sd(
                guards,
                c.omega + (c.alpha + c.gamma * neg) * e.abs() + c.beta * s2.sqrt(),
            );
            sd * sd
        }
    }
}

/// Floor an initial variance the way `variant` floors its state.
pub fn initial_variance(variant: ModelVariant, guards: &VarianceGuards, s2: f64) -> f64 {
    match variant {
        ModelVariant::Threshold => {
            let sd = floor_sd(guards, s2.max(0.0).sqrt());
            sd * sd
        }
        _ => floor_variance(guards, s2),
    }
}

/// Initial variance for a fresh filter: the chosen policy around `mu`.
pub fn seed_variance(init: &Init, returns: &[f64], mu: f64) -> f64 {
    match *init {
        Init::Fixed(v) => v,
        Init::SampleVariance => {
            if returns.is_empty() {
                return f64::NAN;
            }
            returns.iter().map(|r| (r - mu) * (r - mu)).sum::<f64>() / returns.len() as f64
        }
    }
}

/// Filter `returns` from a fresh initial variance.
pub fn filter(
    variant: ModelVariant, c: &Coefficients, ez: f64, guards: &VarianceGuards, init: &Init,
    returns: &[f64],
) -> Filtered {
    let n = returns.len();
    if n == 0 {
        return Filtered::default();
    }
    let resid: Vec<f64> = returns.iter().map(|r| r - c.mu).collect();
    let mut sigma2 = Vec::with_capacity(n);
    sigma2.push(initial_variance(variant, guards, seed_variance(init, returns, c.mu)));
    for t in 1..n {
        sigma2.push(step(variant, c, ez, guards, sigma2[t - 1], resid[t - 1]));
    }
    Filtered { sigma2, resid }
}

/// Σ [ln f(εₜ/σₜ) − ln σₜ]; `-∞` when the total is not finite.
pub fn loglik(filtered: &Filtered, law: &Innovation) -> f64 {
    let total: f64 = filtered
        .sigma2
        .iter()
        .zip(&filtered.resid)
        .map(|(&s2, &e)| {
            let sd = s2.sqrt();
            law.ln_density(e / sd) - sd.ln()
        })
        .sum();
    if total.is_finite() { total } else { f64::NEG_INFINITY }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coeffs(omega: f64, alpha: f64, gamma: f64, beta: f64) -> Coefficients {
        Coefficients { mu: 0.0, omega, alpha, gamma, beta }
    }

    #[test]
    // Purpose
    // -------
    // GJR adds leverage only after a negative shock.
    //
    // Given
    // -----
    // - ω = 1e-6, α = 0.05, γ = 0.1, β = 0.9, σ² = 1e-4, ε = ±0.01.
    //
    // Expect
    // ------
    // - Hand-computed updates for both signs.
    fn gjr_step_is_sign_dependent() {
        let g = VarianceGuards::default();
        let c = coeffs(1e-6, 0.05, 0.1, 0.9);
        let up = step(ModelVariant::Gjr, &c, 0.0, &g, 1e-4, 0.01);
        let down = step(ModelVariant::Gjr, &c, 0.0, &g, 1e-4, -0.01);
        assert_relative_eq!(up, 1e-6 + 0.05 * 1e-4 + 0.9 * 1e-4, epsilon = 1e-15);
        assert_relative_eq!(down, up + 0.1 * 1e-4, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // The Threshold floor acts on σ.
    //
    // Given
    // -----
    // - Coefficients that drive σ negative.
    //
    // Expect
    // ------
    // - σ² = floor².
    fn threshold_floor_acts_on_sd() {
        let g = VarianceGuards::default();
        let c = coeffs(-1.0, 0.05, 0.05, 0.0);
        let s2 = step(ModelVariant::Threshold, &c, 0.8, &g, 1e-4, 0.0);
        assert_eq!(s2, g.min * g.min);
    }

    #[test]
    // Purpose
    // -------
    // Filter indexing and the Normal likelihood closed form.
    //
    // Given
    // -----
    // - Standard coefficients and three returns with μ = 0.
    //
    // Expect
    // ------
    // - sigma2[0] = mean square; sigma2[1] from (sigma2[0], r0);
    //   LL = Σ[-½ ln 2π − ½ z² − ½ ln σ²].
    fn filter_and_loglik_match_hand_computation() {
        let g = VarianceGuards::default();
        let c = coeffs(1e-6, 0.1, 0.0, 0.8);
        let r = [0.01, -0.02, 0.005];
        let f = filter(ModelVariant::Standard, &c, 0.0, &g, &Init::SampleVariance, &r);

        let s0 = (1e-4 + 4e-4 + 2.5e-5) / 3.0;
        assert_relative_eq!(f.sigma2[0], s0, epsilon = 1e-18);
        assert_relative_eq!(f.sigma2[1], 1e-6 + 0.1 * 1e-4 + 0.8 * s0, epsilon = 1e-18);

        let expected: f64 = f
            .sigma2
            .iter()
            .zip(&f.resid)
            .map(|(s2, e)| {
                -0.5 * (2.0 * std::f64::consts::PI).ln() - 0.5 * e * e / s2 - 0.5 * s2.ln()
            })
            .sum();
        assert_relative_eq!(loglik(&f, &Innovation::Normal), expected, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Domain checks reject non-stationary and non-positive additive sets.
    //
    // Given
    // -----
    // - α + β = 1, ω ≤ 0, and an Exponential set with negative ω.
    //
    // Expect
    // ------
    // - The first two are rejected; the Exponential set is accepted.
    fn domain_checks() {
        assert!(!coeffs(1e-6, 0.1, 0.0, 0.9).in_domain(ModelVariant::Standard));
        assert!(!coeffs(0.0, 0.1, 0.0, 0.8).in_domain(ModelVariant::Gjr));
        assert!(coeffs(-0.3, 0.1, -0.05, 0.95).in_domain(ModelVariant::Exponential));
        assert!(!coeffs(-0.3, 0.1, -0.05, 1.0).in_domain(ModelVariant::Exponential));
    }
}
