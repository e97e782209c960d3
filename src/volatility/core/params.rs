//! Constrained GARCH parameters and the Parameter Transform.
//!
//! Purpose
//! -------
//! Represent validated model coefficients `(μ, ω, α, [γ|η], β)` and map them
//! to and from the unconstrained optimizer vector `θ`. The forward map is
//! total: every finite `θ` produces parameters inside the variant's domain.
//!
//! Key behaviors
//! -------------
//! - [`GarchParams::new`] validates a constrained set against its variant.
//! - [`GarchParams::from_theta`] / [`GarchParams::to_theta`] implement the
//!   forward and inverse Parameter Transform for the variant block of `θ`.
//! - [`ParamLayout`] extends the block with the optional skewed-t shape/skew
//!   slots `(θ_ν, θ_ξ)` and splits or joins full optimizer vectors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Additive variants (Standard, GJR, Threshold): ω > 0, α ∈ (0, 1),
//!   β ∈ [0, 1), α + β < 1.
//! - Exponential: ω, α, γ finite; β ∈ [0, 1).
//! - The asymmetry coefficient is unconstrained in every variant; Standard
//!   stores `gamma = 0.0`.
//!
//! Conventions
//! -----------
//! - Layout: `θ = (θ_μ, θ_ω, θ_α, [θ_γ], θ_β, [θ_ν, θ_ξ])`.
//! - Additive maps: `ω = exp(θ_ω)`, `α = logistic(θ_α)` capped at
//!   `1 − ALPHA_MARGIN`, `β = (1 − ε)(1 − α)·logistic(θ_β)` with
//!   `ε = PERSISTENCE_MARGIN`.
//! - Exponential maps: `ω = θ_ω`, `α = θ_α`, `β = logistic(θ_β)`.
//! - Shape maps: `ν = NU_OFFSET + exp(θ_ν)`, `ξ = exp(θ_ξ)`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover inverse round trips, domain rejection, and layout
//!   splitting. Property tests check totality of the forward map over random
//!   finite vectors for every variant.
use crate::{
    optimization::{
        loglik_optimizer::Theta,
        numerical_stability::{PERSISTENCE_MARGIN, safe_exp, safe_ln, safe_logistic, safe_logit},
    },
    volatility::{
        core::{data::ReturnSeries, innovations::Innovation, variant::ModelVariant},
        errors::{ParamError, ParamResult},
    },
};
use ndarray::{Array1, ArrayView1, s};

/// Distance kept between α and 1 so that `α + β < 1` survives rounding.
pub const ALPHA_MARGIN: f64 = 1e-8;

/// Lower bound of the skewed-t degrees of freedom produced by the transform.
pub const NU_OFFSET: f64 = 2.1;

/// GarchParams — validated coefficients of one GARCH-family model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarchParams {
    pub variant: ModelVariant,
    /// Constant conditional mean μ.
    pub mu: f64,
    /// Intercept ω (variance, log-variance, or volatility scale by variant).
    pub omega: f64,
    /// ARCH coefficient α.
    pub alpha: f64,
    /// Asymmetry coefficient (γ for GJR/Exponential, η for Threshold).
    pub gamma: f64,
    /// Persistence coefficient β.
    pub beta: f64,
}

impl GarchParams {
    /// Construct validated parameters.
    ///
    /// For `ModelVariant::Standard` the `gamma` argument is ignored and stored
    /// as `0.0`.
    ///
    /// Errors
    /// ------
    /// - `ParamError::NonFiniteParam` for any NaN/±∞ coefficient.
    /// - `ParamError::InvalidOmega` / `InvalidAlpha` / `InvalidBeta` /
    ///   `StationarityViolated` for additive-domain violations.
    /// - `ParamError::InvalidBeta` for Exponential β outside [0, 1).
    pub fn new(
        variant: ModelVariant, mu: f64, omega: f64, alpha: f64, gamma: f64, beta: f64,
    ) -> ParamResult<Self> {
        let gamma = if variant.has_asymmetry() { gamma } else { 0.0 };
        for (name, value) in
            [("mu", mu), ("omega", omega), ("alpha", alpha), ("gamma", gamma), ("beta", beta)]
        {
            if !value.is_finite() {
                return Err(ParamError::NonFiniteParam { name, value });
            }
        }
        if !(0.0..1.0).contains(&beta) {
            return Err(ParamError::InvalidBeta { value: beta });
        }
        if variant.is_additive() {
            if omega <= 0.0 {
                return Err(ParamError::InvalidOmega { value: omega });
            }
            if alpha <= 0.0 || alpha >= 1.0 {
                return Err(ParamError::InvalidAlpha { value: alpha });
            }
            if alpha + beta >= 1.0 {
                return Err(ParamError::StationarityViolated { coeff_sum: alpha + beta });
            }
        }
        Ok(GarchParams { variant, mu, omega, alpha, gamma, beta })
    }

    /// Forward Parameter Transform for the variant block of `θ`.
    ///
    /// Errors
    /// ------
    /// - `ParamError::ThetaLengthMismatch` unless `theta.len() == variant.n_params()`.
    /// - `ParamError::InvalidThetaInput` for the first non-finite entry.
    pub fn from_theta(variant: ModelVariant, theta: ArrayView1<f64>) -> ParamResult<Self> {
        check_theta(theta, variant.n_params())?;
        let (mu, theta_omega, theta_alpha) = (theta[0], theta[1], theta[2]);
        let (gamma, theta_beta) =
            if variant.has_asymmetry() { (theta[3], theta[4]) } else { (0.0, theta[3]) };

        let params = if variant.is_additive() {
            let alpha = safe_logistic(theta_alpha).min(1.0 - ALPHA_MARGIN);
            let beta = (1.0 - PERSISTENCE_MARGIN) * (1.0 - alpha) * safe_logistic(theta_beta);
            GarchParams { variant, mu, omega: safe_exp(theta_omega), alpha, gamma, beta }
        } else {
            let beta = safe_logistic(theta_beta);
            GarchParams { variant, mu, omega: theta_omega, alpha: theta_alpha, gamma, beta }
        };
        Ok(params)
    }

    /// Inverse Parameter Transform.
    ///
    /// Satisfies `from_theta(to_theta(p)) ≈ p` on the valid domain away from
    /// the logistic saturation points.
    pub fn to_theta(&self) -> Theta {
        let (theta_omega, theta_alpha, theta_beta) = if self.variant.is_additive() {
            let scaled = self.beta / ((1.0 - PERSISTENCE_MARGIN) * (1.0 - self.alpha));
            (safe_ln(self.omega), safe_logit(self.alpha), safe_logit(scaled))
        } else {
            (self.omega, self.alpha, safe_logit(self.beta))
        };
        let mut theta = vec![self.mu, theta_omega, theta_alpha];
        if self.variant.has_asymmetry() {
            theta.push(self.gamma);
        }
        theta.push(theta_beta);
        Array1::from(theta)
    }

    /// Coefficients in layout order (without the Standard γ placeholder).
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = vec![self.mu, self.omega, self.alpha];
        if self.variant.has_asymmetry() {
            out.push(self.gamma);
        }
        out.push(self.beta);
        out
    }

    /// `(name, value)` pairs in layout order.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        self.variant.param_names().iter().copied().zip(self.to_vec()).collect()
    }

    /// Moment-based starting values for an optimizer run.
    ///
    /// Targets the sample variance through each variant's unconditional
    /// level (`abs_moment` is E|z| of the innovation law, used by Threshold).
    pub fn starting_values(
        variant: ModelVariant, series: &ReturnSeries, abs_moment: f64,
    ) -> ParamResult<Self> {
        let mu = series.mean();
        let var = series.variance().max(f64::MIN_POSITIVE);
        match variant {
            ModelVariant::Standard => {
                let (alpha, beta) = (0.05, 0.90);
                Self::new(variant, mu, var * (1.0 - alpha - beta), alpha, 0.0, beta)
            }
            ModelVariant::Gjr => {
                let (alpha, gamma, beta) = (0.03, 0.05, 0.90);
                let omega = var * (1.0 - alpha - 0.5 * gamma - beta);
                Self::new(variant, mu, omega, alpha, gamma, beta)
            }
            ModelVariant::Exponential => {
                let (alpha, gamma, beta) = (0.10, -0.05, 0.95);
                Self::new(variant, mu, (1.0 - beta) * var.ln(), alpha, gamma, beta)
            }
            ModelVariant::Threshold => {
                let (alpha, eta, beta) = (0.05, 0.05, 0.90);
                let level = 1.0 - beta - (alpha + 0.5 * eta) * abs_moment;
                let omega = var.sqrt() * level.max(0.01);
                Self::new(variant, mu, omega, alpha, eta, beta)
            }
        }
    }
}

/// ParamLayout — the full optimizer vector for one fit.
///
/// The variant block is followed by `(θ_ν, θ_ξ)` only when the innovation law
/// is skewed-t and its shape is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLayout {
    pub variant: ModelVariant,
    pub estimate_shape: bool,
}

impl ParamLayout {
    pub fn new(variant: ModelVariant, law: &Innovation, estimate_shape: bool) -> Self {
        ParamLayout { variant, estimate_shape: estimate_shape && law.is_skewed_t() }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.variant.n_params() + if self.estimate_shape { 2 } else { 0 }
    }

    /// Split `θ` into parameters and innovation law.
    ///
    /// When the shape is not estimated, `template` is returned unchanged.
    pub fn decode(
        &self, theta: ArrayView1<f64>, template: &Innovation,
    ) -> ParamResult<(GarchParams, Innovation)> {
        check_theta(theta, self.len())?;
        let k = self.variant.n_params();
        let params = GarchParams::from_theta(self.variant, theta.slice(s![..k]))?;
        let law = if self.estimate_shape {
            let nu = NU_OFFSET + safe_exp(theta[k]);
            let xi = safe_exp(theta[k + 1]);
            Innovation::skewed_t(nu, xi)?
        } else {
            *template
        };
        Ok((params, law))
    }

    /// Join parameters and law into `θ` (inverse of [`ParamLayout::decode`]).
    pub fn encode(&self, params: &GarchParams, law: &Innovation) -> Theta {
        let mut theta = params.to_theta().to_vec();
        if self.estimate_shape {
            if let Innovation::SkewedT { nu, xi } = *law {
                theta.push(safe_ln(nu - NU_OFFSET));
                theta.push(safe_ln(xi));
            }
        }
        Array1::from(theta)
    }
}

fn check_theta(theta: ArrayView1<f64>, expected: usize) -> ParamResult<()> {
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}
