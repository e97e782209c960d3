//! Model variants — the GARCH-family recursions supported by the engine.
//!
//! A [`ModelVariant`] is chosen once per fit and fixes both the parameter
//! layout (4 or 5 coefficients) and the recursion formula. All downstream
//! dispatch matches on this enum; variant names are only parsed at the edges.
use std::{fmt, str::FromStr};

use crate::volatility::errors::GarchError;

/// GARCH-family variant.
///
/// - `Standard`: σₜ² = ω + α ε²ₜ₋₁ + β σ²ₜ₋₁.
/// - `Gjr`: adds γ·1[εₜ₋₁ < 0]·ε²ₜ₋₁ (threshold-asymmetric).
/// - `Exponential`: log-variance form with E|z| centering and leverage γ.
/// - `Threshold`: recursion in σ with η·1[εₜ₋₁ < 0]·|εₜ₋₁| (TGARCH).
///
/// GJR and Threshold correspond to the `fGARCH` submodels of other
/// packages; there is no separate submodel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    Standard,
    Gjr,
    Exponential,
    Threshold,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::Standard,
        ModelVariant::Gjr,
        ModelVariant::Exponential,
        ModelVariant::Threshold,
    ];

    /// Whether the variant carries an asymmetry coefficient (γ or η).
    pub fn has_asymmetry(self) -> bool {
        !matches!(self, ModelVariant::Standard)
    }

    /// Number of variant coefficients: μ, ω, α, [γ], β.
    pub fn n_params(self) -> usize {
        if self.has_asymmetry() { 5 } else { 4 }
    }

    /// Additive variants are constrained by ω > 0 and α + β < 1.
    pub fn is_additive(self) -> bool {
        !matches!(self, ModelVariant::Exponential)
    }

    /// Coefficient names in layout order.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            ModelVariant::Standard => &["mu", "omega", "alpha", "beta"],
            ModelVariant::Gjr | ModelVariant::Exponential => {
                &["mu", "omega", "alpha", "gamma", "beta"]
            }
            ModelVariant::Threshold => &["mu", "omega", "alpha", "eta", "beta"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModelVariant::Standard => "sGARCH",
            ModelVariant::Gjr => "gjrGARCH",
            ModelVariant::Exponential => "eGARCH",
            ModelVariant::Threshold => "TGARCH",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelVariant {
    type Err = GarchError;

    /// Case-insensitive; accepts the short names (`"garch"`, `"gjr"`,
    /// `"egarch"`, `"tgarch"`) and the long ones (`"standard"`,
    /// `"exponential"`, `"threshold"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "garch" | "sgarch" | "standard" => Ok(ModelVariant::Standard),
            "gjr" | "gjrgarch" | "gjr-garch" => Ok(ModelVariant::Gjr),
            "egarch" | "exponential" => Ok(ModelVariant::Exponential),
            "tgarch" | "threshold" => Ok(ModelVariant::Threshold),
            _ => Err(GarchError::UnknownVariant { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Layout sizes and names agree for every variant.
    //
    // Given
    // -----
    // - All four variants.
    //
    // Expect
    // ------
    // - `n_params` equals the number of names; only Standard lacks asymmetry.
    fn layout_matches_names() {
        for v in ModelVariant::ALL {
            assert_eq!(v.n_params(), v.param_names().len());
            assert_eq!(v.has_asymmetry(), v != ModelVariant::Standard);
        }
        assert!(!ModelVariant::Exponential.is_additive());
    }

    #[test]
    // Purpose
    // -------
    // Names parse case-insensitively and round-trip through `Display`.
    //
    // Given
    // -----
    // - Short, long, and display names plus an unknown name.
    //
    // Expect
    // ------
    // - Known names resolve; unknown yields `UnknownVariant`.
    fn variant_names_parse() {
        assert_eq!("GJR".parse::<ModelVariant>().unwrap(), ModelVariant::Gjr);
        assert_eq!("threshold".parse::<ModelVariant>().unwrap(), ModelVariant::Threshold);
        for v in ModelVariant::ALL {
            assert_eq!(v.to_string().parse::<ModelVariant>().unwrap(), v);
        }
        assert!(matches!(
            "figarch".parse::<ModelVariant>(),
            Err(GarchError::UnknownVariant { .. })
        ));
    }
}
