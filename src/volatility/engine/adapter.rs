//! Engine adapter — backend-agnostic fit / path / converged / info-criteria.
//!
//! Purpose
//! -------
//! Give callers one surface over both backends. The backend is chosen once
//! when the [`Engine`] is built and is passed around explicitly; nothing is
//! read from process-wide state.
//!
//! Key behaviors
//! -------------
//! - [`Engine::fit`] returns a [`FitHandle`] recording which backend produced
//!   it.
//! - [`Engine::path`] and [`Engine::forecast`] accept a handle from either
//!   backend; provenance is informational only.
//! - [`FitHandle::converged`] and [`FitHandle::info_criteria`] read the
//!   wrapped [`FitResult`].
use ndarray::ArrayView1;

use crate::volatility::{
    core::{
        data::ReturnSeries, forecasts::VarianceForecast, innovations::Innovation,
        likelihood::InfoCriteria, options::GarchOptions, simulation::SimulatedPath,
        variant::ModelVariant,
    },
    engine::backend::{EngineKind, VolatilityBackend},
    errors::GarchResult,
    models::FitResult,
};

/// EngineConfig — options shared by both backends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub options: GarchOptions,
}

impl EngineConfig {
    pub fn new(options: GarchOptions) -> Self {
        EngineConfig { options }
    }
}

/// FitHandle — a fit result plus the backend that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FitHandle {
    pub engine: EngineKind,
    pub result: FitResult,
}

impl FitHandle {
    pub fn converged(&self) -> bool {
        self.result.converged
    }

    pub fn info_criteria(&self) -> InfoCriteria {
        self.result.info_criteria()
    }
}

/// Engine — a chosen backend with its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub kind: EngineKind,
    pub config: EngineConfig,
}

impl Engine {
    pub fn new(kind: EngineKind, config: EngineConfig) -> Self {
        Engine { kind, config }
    }

    /// An engine of `kind` with default options.
    pub fn with_defaults(kind: EngineKind) -> Self {
        Engine::new(kind, EngineConfig::default())
    }

    fn backend(&self) -> &'static dyn VolatilityBackend {
        self.kind.backend()
    }

    /// Fit `variant` with innovation `law` to `returns`.
    ///
    /// A fit that does not converge is returned with `converged() == false`.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InsufficientData` / `DegenerateSeries` for unusable
    ///   series, `GarchError::Optimization` for optimizer failures.
    pub fn fit(
        &self, variant: ModelVariant, law: Innovation, returns: &ReturnSeries,
    ) -> GarchResult<FitHandle> {
        let result = self.backend().fit(variant, law, returns, &self.config.options)?;
        Ok(FitHandle { engine: self.kind, result })
    }

    /// Simulate `horizon` steps continuing `handle` with supplied
    /// innovations.
    pub fn path(
        &self, handle: &FitHandle, innovations: ArrayView1<f64>, horizon: usize,
    ) -> GarchResult<SimulatedPath> {
        self.backend().path(&handle.result, innovations, horizon)
    }

    pub fn forecast(&self, handle: &FitHandle) -> GarchResult<VarianceForecast> {
        self.backend().forecast(&handle.result)
    }

    pub fn converged(&self, handle: &FitHandle) -> bool {
        handle.converged()
    }

    pub fn info_criteria(&self, handle: &FitHandle) -> InfoCriteria {
        handle.info_criteria()
    }
}
