//! One-step-ahead variance forecast from a fitted state.
//!
//! The forecast evaluates the variant's recursion once at the last in-sample
//! `(σ²_T, ε_T)` pair with the same guards as the filter:
//! `σ²_{T+1} = next(σ²_T, ε_T)`. The mean forecast is the constant μ.
use crate::volatility::core::{
    guards::VarianceGuards, init::WarmStart, params::GarchParams, recursion::next_variance,
};

/// VarianceForecast — one-step-ahead conditional variance, volatility, mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceForecast {
    pub sigma2: f64,
    pub volatility: f64,
    pub mean: f64,
}

/// Forecast `σ²_{T+1}` from the last known state.
pub fn forecast_one_step(
    params: &GarchParams, abs_moment: f64, guards: &VarianceGuards, state: &WarmStart,
) -> VarianceForecast {
    let sigma2 = next_variance(params, abs_moment, guards, state.sigma2, state.resid);
    VarianceForecast { sigma2, volatility: sigma2.sqrt(), mean: params.mu }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::variant::ModelVariant;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // The forecast is one recursion step from the last state.
    //
    // Given
    // -----
    // - Standard params (ω = 2e-6, α = 0.08, β = 0.9, μ = 5e-4) and the state
    //   σ² = 1e-4, ε = 0.02.
    //
    // Expect
    // ------
    // - σ² = 2e-6 + 0.08·4e-4 + 0.9·1e-4, volatility = √σ², mean = μ.
    fn forecast_is_one_recursion_step() {
        let p = GarchParams::new(ModelVariant::Standard, 5e-4, 2e-6, 0.08, 0.0, 0.9).unwrap();
        let state = WarmStart::new(1e-4, 0.02, 5e-4).unwrap();
        let f = forecast_one_step(&p, 0.0, &VarianceGuards::default(), &state);

        let expected = 2e-6 + 0.08 * 4e-4 + 0.9 * 1e-4;
        assert_relative_eq!(f.sigma2, expected, max_relative = 1e-12);
        assert_relative_eq!(f.volatility, expected.sqrt(), max_relative = 1e-12);
        assert_eq!(f.mean, 5e-4);
    }
}
