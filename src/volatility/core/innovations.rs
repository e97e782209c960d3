//! Innovation laws for standardized shocks `z = ε / σ`.
//!
//! Two laws are supported: the standard Normal and the skewed Student-t of
//! [`crate::volatility::core::skew_t`], both with zero mean and unit variance.
//! Skewed-t routines go through the robust wrappers, so density, CDF,
//! quantile and sampling never fail; a failure degrades to the Normal result
//! with a logged warning. Only [`Innovation::abs_moment`] surfaces a domain
//! error, since it is a pure moment formula.
use std::{f64::consts::PI, str::FromStr};

use rand::{Rng, distributions::Distribution};
use statrs::{
    distribution::{ContinuousCDF, Normal},
    function::gamma::ln_gamma,
};

use crate::volatility::{
    core::skew_t::{ln_dsstd_robust, psstd_robust, qsstd_robust, rsstd_robust},
    errors::{GarchError, ParamError, ParamResult},
};

/// Default degrees of freedom when a skewed-t law is requested by name.
pub const DEFAULT_NU: f64 = 8.0;

/// Default skew when a skewed-t law is requested by name.
pub const DEFAULT_XI: f64 = 1.0;

const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Innovation distribution of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Innovation {
    #[default]
    Normal,
    /// Fernández–Steel skewed Student-t with shape `nu > 2` and skew `xi > 0`.
    SkewedT { nu: f64, xi: f64 },
}

impl Innovation {
    pub fn normal() -> Self {
        Innovation::Normal
    }

    /// Validated skewed-t law.
    ///
    /// Errors
    /// ------
    /// - `ParamError::InvalidShape` unless `nu` is finite and `> 2`.
    /// - `ParamError::InvalidSkew` unless `xi` is finite and `> 0`.
    pub fn skewed_t(nu: f64, xi: f64) -> ParamResult<Self> {
        if !nu.is_finite() || nu <= 2.0 {
            return Err(ParamError::InvalidShape { nu });
        }
        if !xi.is_finite() || xi <= 0.0 {
            return Err(ParamError::InvalidSkew { xi });
        }
        Ok(Innovation::SkewedT { nu, xi })
    }

    pub fn is_skewed_t(&self) -> bool {
        matches!(self, Innovation::SkewedT { .. })
    }

    /// Number of shape parameters the law adds when estimated.
    pub fn n_shape_params(&self) -> usize {
        if self.is_skewed_t() { 2 } else { 0 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Innovation::Normal => "norm",
            Innovation::SkewedT { .. } => "sstd",
        }
    }

    /// Log-density of a standardized shock.
    pub fn ln_density(&self, z: f64) -> f64 {
        match *self {
            Innovation::Normal => -LN_SQRT_2PI - 0.5 * z * z,
            Innovation::SkewedT { nu, xi } => ln_dsstd_robust(z, 0.0, 1.0, nu, xi),
        }
    }

    pub fn cdf(&self, z: f64) -> f64 {
        match *self {
            Innovation::Normal => standard_normal().map_or(f64::NAN, |n| n.cdf(z)),
            Innovation::SkewedT { nu, xi } => psstd_robust(z, 0.0, 1.0, nu, xi),
        }
    }

    pub fn quantile(&self, p: f64) -> f64 {
        match *self {
            Innovation::Normal => {
                if p.is_nan() || !(0.0..=1.0).contains(&p) {
                    return f64::NAN;
                }
                standard_normal().map_or(f64::NAN, |n| n.inverse_cdf(p))
            }
            Innovation::SkewedT { nu, xi } => qsstd_robust(p, 0.0, 1.0, nu, xi),
        }
    }

    /// `n` IID standardized draws.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        match *self {
            Innovation::Normal => match standard_normal() {
                Some(law) => (0..n).map(|_| law.sample(rng)).collect(),
                None => vec![f64::NAN; n],
            },
            Innovation::SkewedT { nu, xi } => rsstd_robust(rng, n, 0.0, 1.0, nu, xi),
        }
    }

    /// First absolute moment `E|z|`.
    ///
    /// Normal: `√(2/π)`. Skewed-t: the Student-t closed form
    /// `√(ν/π)·Γ((ν−1)/2)/Γ(ν/2)`.
    ///
    /// Errors
    /// ------
    /// - `ParamError::AbsMomentUndefined` when `ν ≤ 2` or `ν` is not finite.
    pub fn abs_moment(&self) -> ParamResult<f64> {
        match *self {
            Innovation::Normal => Ok((2.0 / PI).sqrt()),
            Innovation::SkewedT { nu, .. } => student_t_abs_moment(nu),
        }
    }
}

impl FromStr for Innovation {
    type Err = GarchError;

    /// Case-insensitive. Skewed-t names start from `(DEFAULT_NU, DEFAULT_XI)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "norm" | "normal" | "gaussian" => Ok(Innovation::Normal),
            "sstd" | "skewt" | "skew-t" | "skewed-t" | "skewed_t" => {
                Ok(Innovation::SkewedT { nu: DEFAULT_NU, xi: DEFAULT_XI })
            }
            _ => Err(GarchError::UnknownDistribution { name: s.to_string() }),
        }
    }
}

/// `E|T|` for a Student-t with `nu` degrees of freedom (`nu > 2`).
pub fn student_t_abs_moment(nu: f64) -> ParamResult<f64> {
    if !nu.is_finite() || nu <= 2.0 {
        return Err(ParamError::AbsMomentUndefined { nu });
    }
    let ratio = (ln_gamma(0.5 * (nu - 1.0)) - ln_gamma(0.5 * nu)).exp();
    Ok((nu / PI).sqrt() * ratio)
}

fn standard_normal() -> Option<Normal> {
    Normal::new(0.0, 1.0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    // Purpose
    // -------
    // Construction validates the skewed-t domain.
    //
    // Given
    // -----
    // - ν = 2, ν = NaN, ξ = 0, and a valid (5, 0.8).
    //
    // Expect
    // ------
    // - `InvalidShape`, `InvalidShape`, `InvalidSkew`, Ok.
    fn skewed_t_validates_domain() {
        assert!(matches!(Innovation::skewed_t(2.0, 1.0), Err(ParamError::InvalidShape { .. })));
        assert!(matches!(
            Innovation::skewed_t(f64::NAN, 1.0),
            Err(ParamError::InvalidShape { .. })
        ));
        assert!(matches!(Innovation::skewed_t(5.0, 0.0), Err(ParamError::InvalidSkew { .. })));
        assert!(Innovation::skewed_t(5.0, 0.8).unwrap().is_skewed_t());
    }

    #[test]
    // Purpose
    // -------
    // `E|z|` matches the closed forms and rejects ν ≤ 2.
    //
    // Given
    // -----
    // - Normal; Student-t with ν = 3 (E|T| = 2√3/π); ν = 1.5.
    //
    // Expect
    // ------
    // - √(2/π); 2√3/π; `AbsMomentUndefined`.
    fn abs_moment_closed_forms() {
        assert_relative_eq!(Innovation::Normal.abs_moment().unwrap(), (2.0 / PI).sqrt());
        assert_relative_eq!(
            student_t_abs_moment(3.0).unwrap(),
            2.0 * 3f64.sqrt() / PI,
            epsilon = 1e-12
        );
        assert_eq!(student_t_abs_moment(1.5), Err(ParamError::AbsMomentUndefined { nu: 1.5 }));
    }

    #[test]
    // Purpose
    // -------
    // The Normal log-density is the closed form `-½(ln 2π + z²)`.
    //
    // Given
    // -----
    // - z ∈ {0, 1.5, -3}.
    //
    // Expect
    // ------
    // - Equality to 1e-14, and quantile/CDF inverse at p = 0.975.
    fn normal_log_density_closed_form() {
        for z in [0.0, 1.5, -3.0] {
            let expected = -0.5 * ((2.0 * PI).ln() + z * z);
            assert_relative_eq!(Innovation::Normal.ln_density(z), expected, epsilon = 1e-14);
        }
        let q = Innovation::Normal.quantile(0.975);
        assert_relative_eq!(q, 1.959_963_984_540_054, epsilon = 1e-8);
        assert_relative_eq!(Innovation::Normal.cdf(q), 0.975, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Seeded sampling is reproducible and names parse.
    //
    // Given
    // -----
    // - Two StdRng streams with seed 5; the names "Normal", "sstd", "cauchy".
    //
    // Expect
    // ------
    // - Identical draws; parsed laws; `UnknownDistribution`.
    fn sampling_and_names() {
        let law = Innovation::skewed_t(7.0, 1.1).unwrap();
        let a = law.sample(&mut StdRng::seed_from_u64(5), 16);
        let b = law.sample(&mut StdRng::seed_from_u64(5), 16);
        assert_eq!(a, b);
        assert!(a.iter().all(|z| z.is_finite()));

        assert_eq!("Normal".parse::<Innovation>().unwrap(), Innovation::Normal);
        assert!("sstd".parse::<Innovation>().unwrap().is_skewed_t());
        assert!(matches!(
            "cauchy".parse::<Innovation>(),
            Err(GarchError::UnknownDistribution { .. })
        ));
    }
}
