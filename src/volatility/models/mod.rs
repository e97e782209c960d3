//! models — GARCH-family estimation for the manual backend.
//!
//! Purpose
//! -------
//! Sit on top of `volatility::core`, wiring the Parameter Transform, variance
//! recursion and likelihood into the generic log-likelihood optimizer, and
//! define the [`FitResult`] both backends return.
//!
//! Key behaviors
//! -------------
//! - [`GarchModel`] implements [`LogLikelihood`] over unconstrained `θ` and
//!   provides `fit`.
//! - [`FitResult`] carries parameters, scores, convergence, the in-sample
//!   variance sequence, and the final state; it provides `forecast` and
//!   `simulate`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated [`ReturnSeries`]; sample-size checks happen before
//!   any optimizer run.
//! - A [`FitResult`] is immutable; a non-converged fit is a value, not an
//!   error.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood
//! [`ReturnSeries`]: crate::volatility::core::data::ReturnSeries
pub mod fit;
pub mod garch;

pub use self::fit::{FitDiagnostics, FitResult};
pub use self::garch::GarchModel;

pub mod prelude {
    pub use super::{FitDiagnostics, FitResult, GarchModel};
}
