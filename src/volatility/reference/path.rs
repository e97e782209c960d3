//! Reference path simulation and one-step forecasting.
//!
//! The loop mirrors the data-generating recursion directly on slices: from
//! the fit's last `(σ², ε)` state it advances one step to `σ²₁`, then for
//! each supplied innovation records `(σ², ε = σ·z, r = μ + ε)` and advances
//! again. Innovations are always caller-supplied.
use ndarray::{Array1, ArrayView1};

use crate::volatility::{
    core::{
        forecasts::VarianceForecast,
        simulation::{SimulatedPath, validate_innovations},
    },
    errors::GarchResult,
    models::FitResult,
    reference::filter::{Coefficients, step},
};

/// Simulate `horizon` steps continuing from `fit`'s final state.
///
/// Errors
/// ------
/// - `GarchError::InvalidHorizon` for `horizon == 0`.
/// - `GarchError::InnovationsTooShort` / `NonFiniteInnovation` for unusable
///   innovations.
/// - `GarchError::ParameterDomain` if the fitted law has no `E|z|`.
pub fn simulate(
    fit: &FitResult, innovations: ArrayView1<f64>, horizon: usize,
) -> GarchResult<SimulatedPath> {
    validate_innovations(innovations, horizon)?;
    let ez = fit.abs_moment()?;
    let c = Coefficients::from_params(&fit.params);
    let z: Vec<f64> = innovations.iter().take(horizon).copied().collect();

    let mut sigma2 = Vec::with_capacity(horizon);
    let mut resid = Vec::with_capacity(horizon);
    let mut returns = Vec::with_capacity(horizon);
    let mut s2 = step(
        fit.variant,
        &c,
        ez,
        &fit.guards,
        fit.last_state.sigma2,
        fit.last_state.resid,
    );
    for zt in z {
        let e = s2.sqrt() * zt;
        sigma2.push(s2);
        resid.push(e);
        returns.push(c.mu + e);
        s2 = step(fit.variant, &c, ez, &fit.guards, s2, e);
    }
    Ok(SimulatedPath {
        sigma2: Array1::from(sigma2),
        resid: Array1::from(resid),
        returns: Array1::from(returns),
    })
}

/// One-step-ahead forecast from `fit`'s final state.
pub fn forecast(fit: &FitResult) -> GarchResult<VarianceForecast> {
    let c = Coefficients::from_params(&fit.params);
    let s2 = step(
        fit.variant,
        &c,
        fit.abs_moment()?,
        &fit.guards,
        fit.last_state.sigma2,
        fit.last_state.resid,
    );
    Ok(VarianceForecast { sigma2: s2, volatility: s2.sqrt(), mean: c.mu })
}
