//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used for volatility model fitting: an
//! Argmin-backed log-likelihood optimizer, numerically stable scalar
//! transforms, and a single error/result surface. Callers implement a
//! log-likelihood, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`), with Nelder–Mead and L-BFGS solvers, iteration
//!   caps, and wall-clock timeouts.
//! - Supply shared numerical primitives (`numerical_stability`) for mapping
//!   unconstrained parameters into bounded model domains.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - All solvers maximize `ℓ(θ)` by minimizing an internal cost
//!   `c(θ) = -ℓ(θ)`; user-facing outcomes are expressed in terms of `ℓ`.
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors or model-specific error enums.
//!
//! Downstream usage
//! ----------------
//! - `volatility` implements `LogLikelihood` for GARCH-family models and
//!   builds its Parameter Transform from `numerical_stability`.
//! - Front-ends typically import `optimization::prelude::*`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
