//! Backends behind the engine adapter.
//!
//! A [`VolatilityBackend`] fits a variant/law pair to a series and continues
//! any [`FitResult`] with a forecast or a simulated path. The two
//! implementations are [`ManualBackend`] (transform-space MLE over the
//! shared core) and [`ReferenceBackend`] (the independent constrained-space
//! code in `volatility::reference`).
use std::{fmt, str::FromStr};

use ndarray::ArrayView1;

use crate::volatility::{
    core::{
        data::ReturnSeries, forecasts::VarianceForecast, innovations::Innovation,
        options::GarchOptions, simulation::SimulatedPath, variant::ModelVariant,
    },
    errors::{GarchError, GarchResult},
    models::{FitResult, GarchModel},
    reference::{ReferenceEstimator, path},
};

/// Which backend serves the engine's operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineKind {
    #[default]
    Manual,
    Reference,
}

impl EngineKind {
    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Manual => "manual",
            EngineKind::Reference => "reference",
        }
    }

    /// The backend implementation for this kind.
    pub fn backend(self) -> &'static dyn VolatilityBackend {
        match self {
            EngineKind::Manual => &ManualBackend,
            EngineKind::Reference => &ReferenceBackend,
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = GarchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(EngineKind::Manual),
            "reference" | "ref" => Ok(EngineKind::Reference),
            _ => Err(GarchError::UnknownEngine { name: s.to_string() }),
        }
    }
}

/// Operations every backend provides.
///
/// Implementations hold no state; one instance serves concurrent callers.
pub trait VolatilityBackend: Send + Sync {
    fn kind(&self) -> EngineKind;

    /// Fit `variant` with innovation `law` to `returns`.
    fn fit(
        &self, variant: ModelVariant, law: Innovation, returns: &ReturnSeries,
        options: &GarchOptions,
    ) -> GarchResult<FitResult>;

    /// Simulate `horizon` steps from `fit`'s final state.
    fn path(
        &self, fit: &FitResult, innovations: ArrayView1<f64>, horizon: usize,
    ) -> GarchResult<SimulatedPath>;

    /// One-step-ahead forecast from `fit`'s final state.
    fn forecast(&self, fit: &FitResult) -> GarchResult<VarianceForecast>;
}

/// Transform-space backend built on `volatility::core` and
/// `volatility::models`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualBackend;

impl VolatilityBackend for ManualBackend {
    fn kind(&self) -> EngineKind {
        EngineKind::Manual
    }

    fn fit(
        &self, variant: ModelVariant, law: Innovation, returns: &ReturnSeries,
        options: &GarchOptions,
    ) -> GarchResult<FitResult> {
        GarchModel::new(variant, law, options.clone()).fit(returns, None)
    }

    fn path(
        &self, fit: &FitResult, innovations: ArrayView1<f64>, horizon: usize,
    ) -> GarchResult<SimulatedPath> {
        fit.simulate(innovations, horizon)
    }

    fn forecast(&self, fit: &FitResult) -> GarchResult<VarianceForecast> {
        fit.forecast()
    }
}

/// Constrained-space backend built on `volatility::reference`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBackend;

impl VolatilityBackend for ReferenceBackend {
    fn kind(&self) -> EngineKind {
        EngineKind::Reference
    }

    fn fit(
        &self, variant: ModelVariant, law: Innovation, returns: &ReturnSeries,
        options: &GarchOptions,
    ) -> GarchResult<FitResult> {
        ReferenceEstimator::new(variant, law, options.clone()).fit(returns)
    }

    fn path(
        &self, fit: &FitResult, innovations: ArrayView1<f64>, horizon: usize,
    ) -> GarchResult<SimulatedPath> {
        path::simulate(fit, innovations, horizon)
    }

    fn forecast(&self, fit: &FitResult) -> GarchResult<VarianceForecast> {
        path::forecast(fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Engine names parse case-insensitively and map to matching backends.
    //
    // Given
    // -----
    // - "Manual", "REFERENCE", and "scipy".
    //
    // Expect
    // ------
    // - The two kinds, then `UnknownEngine`; `backend().kind()` round-trips.
    fn engine_kind_parsing() {
        assert_eq!("Manual".parse::<EngineKind>().unwrap(), EngineKind::Manual);
        assert_eq!("REFERENCE".parse::<EngineKind>().unwrap(), EngineKind::Reference);
        assert_eq!(
            "scipy".parse::<EngineKind>().unwrap_err(),
            GarchError::UnknownEngine { name: "scipy".into() }
        );
        for kind in [EngineKind::Manual, EngineKind::Reference] {
            assert_eq!(kind.backend().kind(), kind);
            assert_eq!(kind.to_string().parse::<EngineKind>().unwrap(), kind);
        }
    }
}
