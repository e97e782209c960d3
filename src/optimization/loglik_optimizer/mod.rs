//! loglik_optimizer — MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. Callers implement a single trait,
//! [`LogLikelihood`], and invoke [`maximize`] to run either a derivative-free
//! Nelder–Mead simplex or L-BFGS with a configurable line search.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-likelihoods `ℓ(θ)` into Argmin-compatible
//!   cost functions `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`], with a
//!   finite-difference gradient fallback for L-BFGS.
//! - Expose a single entrypoint [`maximize`] that validates the initial
//!   guess, builds the configured solver via [`builders`], executes it via
//!   [`run`], and normalizes results into an [`OptimOutcome`].
//! - Apply iteration caps and an optional wall-clock timeout uniformly to
//!   every solver.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** `ℓ(θ)` by minimizing `-ℓ(θ)`.
//! - [`LogLikelihood::value`] must treat invalid inputs as recoverable
//!   [`OptError`](crate::optimization::errors::OptError) values, not panics.
//! - `OptimOutcome::converged` is `true` only when the solver met its own
//!   convergence criterion. Iteration caps and timeouts yield `false`.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained optimizer space as [`Theta`]
//!   (`Array1<f64>`). Any mapping from constrained → unconstrained space
//!   happens in the model layer.
//! - Errors bubble up as `OptResult<T>`; this module and its children never
//!   intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - `volatility::models::GarchModel` implements [`LogLikelihood`] and calls
//!   [`maximize`] with its starting vector and [`MLEOptions`].
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions in [`adapter`], solver
//!   construction in [`builders`], option validation in [`traits`] and
//!   [`validation`], and toy maximizations for each solver path in [`api`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{
    LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, SolverKind, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{
        LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, SolverKind, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
