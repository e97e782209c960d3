//! rust_garch — GARCH-family volatility models with two interchangeable
//! backends and optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the engine adapter to Python via the `_rust_garch` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`optimization` and `volatility`) as the
//!   public crate surface.
//! - Behind `python-bindings`, define the `GarchEngine`, `GarchFit` and
//!   `GarchPath` classes and register them under
//!   `rust_garch.volatility`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work happens in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - The backend is a property of a `GarchEngine` instance; there is no
//!   module-level "current engine".
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are converted to `PyErr` at the boundary
//!   (`ValueError`).
//! - Variant names accept `"garch"`, `"gjr"`, `"egarch"`, `"tgarch"`;
//!   distribution names accept `"norm"` and `"sstd"`; engine names accept
//!   `"manual"` and `"reference"`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`volatility::engine::Engine`] or the
//!   backend types directly and can ignore the PyO3 items.

pub mod optimization;
pub mod utils;
pub mod volatility;

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    utils::{build_garch_options, extract_f64_vec, extract_returns},
    volatility::{
        core::{
            innovations::Innovation, simulation::SimulatedPath, variant::ModelVariant,
        },
        engine::{Engine, EngineConfig, EngineKind, FitHandle},
    },
};

/// GarchEngine — Python-facing engine adapter.
///
/// Purpose
/// -------
/// Hold one backend selector plus the shared fitting options, and expose the
/// four engine operations (`fit`, `path`, `converged`, `info_criteria`) and
/// the one-step forecast.
///
/// Parameters
/// ----------
/// Constructed from Python via `GarchEngine(engine="manual", ...)`:
/// - `engine`: `"manual"` or `"reference"`.
/// - `init_fixed`: fixed initial variance; sample variance when `None`.
/// - `variance_guards`: `(min, max)` bounds on every conditional variance.
/// - `solver`, `tol_grad`, `tol_cost`, `max_iter`, `line_searcher`,
///   `timeout`: optimizer configuration (`timeout` in seconds).
/// - `estimate_shape`: estimate skewed-t shape and skew (default `True`).
///
/// Notes
/// -----
/// - Fits release the GIL, so several engines can fit from Python threads
///   concurrently.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_garch.volatility")]
pub struct GarchEngine {
    inner: Engine,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GarchEngine {
    #[new]
    #[pyo3(
        signature = (
            engine = "manual",
            init_fixed = None,
            variance_guards = None,
            solver = None,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            timeout = None,
            estimate_shape = true,
        ),
        text_signature = "(engine='manual', /, init_fixed=None, variance_guards=None, \
                          solver=None, tol_grad=None, tol_cost=None, max_iter=None, \
                          line_searcher=None, timeout=None, estimate_shape=True)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        engine: &str, init_fixed: Option<f64>, variance_guards: Option<(f64, f64)>,
        solver: Option<&str>, tol_grad: Option<f64>, tol_cost: Option<f64>,
        max_iter: Option<usize>, line_searcher: Option<&str>, timeout: Option<f64>,
        estimate_shape: bool,
    ) -> PyResult<Self> {
        let kind = EngineKind::from_str(engine)?;
        let options = build_garch_options(
            init_fixed,
            variance_guards,
            solver,
            tol_grad,
            tol_cost,
            max_iter,
            line_searcher,
            timeout,
            estimate_shape,
        )?;
        Ok(GarchEngine { inner: Engine::new(kind, EngineConfig::new(options)) })
    }

    #[getter]
    pub fn engine(&self) -> &'static str {
        self.inner.kind.name()
    }

    /// Fit a model and return a `GarchFit` handle.
    #[pyo3(signature = (returns, variant = "garch", dist = "norm"))]
    pub fn fit<'py>(
        &self, py: Python<'py>, returns: &Bound<'py, PyAny>, variant: &str, dist: &str,
    ) -> PyResult<GarchFit> {
        let data = extract_returns(py, returns)?;
        let variant = ModelVariant::from_str(variant)?;
        let law = Innovation::from_str(dist)?;
        let engine = &self.inner;
        let handle = py.allow_threads(|| engine.fit(variant, law, &data))?;
        Ok(GarchFit { inner: handle })
    }

    /// Simulate `horizon` steps from a fit with supplied innovations.
    pub fn path<'py>(
        &self, py: Python<'py>, fit: &GarchFit, innovations: &Bound<'py, PyAny>, horizon: usize,
    ) -> PyResult<GarchPath> {
        let z = ndarray::Array1::from(extract_f64_vec(py, innovations, "innovations")?);
        let path = self.inner.path(&fit.inner, z.view(), horizon)?;
        Ok(GarchPath { inner: path })
    }

    /// One-step forecast as `(sigma2, volatility, mean)`.
    pub fn forecast(&self, fit: &GarchFit) -> PyResult<(f64, f64, f64)> {
        let f = self.inner.forecast(&fit.inner)?;
        Ok((f.sigma2, f.volatility, f.mean))
    }

    pub fn converged(&self, fit: &GarchFit) -> bool {
        self.inner.converged(&fit.inner)
    }

    /// `(aic, bic, log_likelihood)`.
    pub fn info_criteria(&self, fit: &GarchFit) -> (f64, f64, f64) {
        let ic = self.inner.info_criteria(&fit.inner);
        (ic.aic, ic.bic, ic.log_likelihood)
    }
}

/// GarchFit — Python view of a fitted model handle.
///
/// Instances are produced by `GarchEngine.fit` and can be passed to `path`
/// or `forecast` on any engine.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_garch.volatility")]
pub struct GarchFit {
    pub inner: FitHandle,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GarchFit {
    #[getter]
    pub fn engine(&self) -> &'static str {
        self.inner.engine.name()
    }

    #[getter]
    pub fn variant(&self) -> &'static str {
        self.inner.result.variant.name()
    }

    #[getter]
    pub fn dist(&self) -> &'static str {
        self.inner.result.law.name()
    }

    /// `(name, value)` pairs in layout order.
    #[getter]
    pub fn params(&self) -> Vec<(&'static str, f64)> {
        self.inner.result.params.named()
    }

    /// `(nu, xi)` for a skewed-t law, else `None`.
    #[getter]
    pub fn shape(&self) -> Option<(f64, f64)> {
        match self.inner.result.law {
            Innovation::SkewedT { nu, xi } => Some((nu, xi)),
            Innovation::Normal => None,
        }
    }

    #[getter]
    pub fn log_likelihood(&self) -> f64 {
        self.inner.result.log_likelihood
    }

    #[getter]
    pub fn aic(&self) -> f64 {
        self.inner.result.aic
    }

    #[getter]
    pub fn bic(&self) -> f64 {
        self.inner.result.bic
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged()
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.result.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.result.iterations
    }

    #[getter]
    pub fn sigma2(&self) -> Vec<f64> {
        self.inner.result.variance.sigma2.to_vec()
    }

    #[getter]
    pub fn residuals(&self) -> Vec<f64> {
        self.inner.result.variance.resid.to_vec()
    }

    /// Final `(sigma2, resid, mean)` state.
    #[getter]
    pub fn last_state(&self) -> (f64, f64, f64) {
        let s = self.inner.result.last_state;
        (s.sigma2, s.resid, s.mean)
    }
}

/// GarchPath — simulated `(sigma2, resid, returns)` sequences.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_garch.volatility")]
pub struct GarchPath {
    pub inner: SimulatedPath,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GarchPath {
    #[getter]
    pub fn sigma2(&self) -> Vec<f64> {
        self.inner.sigma2.to_vec()
    }

    #[getter]
    pub fn resid(&self) -> Vec<f64> {
        self.inner.resid.to_vec()
    }

    #[getter]
    pub fn returns(&self) -> Vec<f64> {
        self.inner.returns.to_vec()
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// _rust_garch — PyO3 module initializer for the Python extension.
///
/// Creates the `volatility` submodule, attaches it to `_rust_garch`, and
/// registers it in `sys.modules` so that `rust_garch.volatility` imports
/// work with dotted paths.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_garch<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let volatility_mod = PyModule::new(_py, "volatility")?;
    volatility(_py, m, &volatility_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_garch.volatility", volatility_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn volatility<'py>(
    _py: Python, rust_garch: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<GarchEngine>()?;
    m.add_class::<GarchFit>()?;
    m.add_class::<GarchPath>()?;
    rust_garch.add_submodule(m)?;
    Ok(())
}
