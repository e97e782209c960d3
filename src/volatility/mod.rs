//! volatility — GARCH-family conditional-volatility stack with two backends.
//!
//! Purpose
//! -------
//! Fit GARCH-family models to return series, forecast one step ahead, and
//! simulate multi-step paths driven by caller-supplied innovations. Two
//! independent backends implement the same operations and are selected
//! through the engine adapter.
//!
//! Key behaviors
//! -------------
//! - [`core`]: return data, variants, the Parameter Transform, innovation
//!   laws (Normal, skewed Student-t with Normal fallbacks), variance
//!   recursion and guards, likelihood, forecasting, and path simulation.
//! - [`models`]: the manual backend's MLE in unconstrained coordinates
//!   ([`GarchModel`]) and the shared [`FitResult`].
//! - [`reference`]: the constrained-space reference backend.
//! - [`engine`]: [`Engine`], [`EngineKind`] and [`FitHandle`], the
//!   backend-agnostic fit / path / converged / info-criteria surface.
//! - [`batch`]: parallel sweeps over independent fit jobs with
//!   skip-and-continue error handling.
//! - [`errors`]: [`GarchError`] / [`ParamError`] and their result aliases.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every constrained parameter set satisfies its variant's domain, and
//!   every conditional variance is finite and strictly positive.
//! - The engine selector is passed explicitly; no global state is read.
//! - A [`FitResult`] from either backend is accepted by both backends.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `sigma2[t]` is the variance of `r_t` given
//!   information through `t − 1`.
//! - Logging goes through `tracing`; the library installs no subscriber.
//!
//! Downstream usage
//! ----------------
//! - Typical end-to-end flow:
//!   1. Wrap returns in [`ReturnSeries`].
//!   2. Build an [`Engine`] with an [`EngineKind`] and `EngineConfig`.
//!   3. `engine.fit(variant, law, &returns)` → [`FitHandle`].
//!   4. `engine.path(&handle, innovations, horizon)` and
//!      `engine.forecast(&handle)`; `handle.converged()` and
//!      `handle.info_criteria()` for diagnostics.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module. Integration tests under `tests/`
//!   run the end-to-end pipeline and the backend conformance suite.

pub mod batch;
pub mod core;
pub mod engine;
pub mod errors;
pub mod models;
pub mod reference;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::batch::{BatchOutcome, FitJob, fit_batch};
pub use self::core::{
    GarchOptions, GarchParams, InfoCriteria, Init, Innovation, ModelVariant, ReturnSeries,
    SimulatedPath, VarianceForecast, VarianceGuards, WarmStart,
};
pub use self::engine::{Engine, EngineConfig, EngineKind, FitHandle, VolatilityBackend};
pub use self::errors::{GarchError, GarchResult, ParamError, ParamResult};
pub use self::models::{FitResult, GarchModel};

pub mod prelude {
    pub use super::{
        BatchOutcome, Engine, EngineConfig, EngineKind, FitHandle, FitJob, FitResult,
        GarchError, GarchModel, GarchOptions, GarchParams, GarchResult, InfoCriteria, Init,
        Innovation, ModelVariant, ReturnSeries, SimulatedPath, VarianceGuards, WarmStart,
        fit_batch,
    };
}
