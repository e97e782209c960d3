//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the log-likelihood
//! optimizer so the rest of the optimization code stays agnostic to `ndarray`
//! and Argmin generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, gradients, and scalar
//!   costs (`Theta`, `Grad`, `Cost`).
//! - Provide the map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//! - Expose pre-wired solver aliases: Nelder–Mead on `Theta`, and L-BFGS for
//!   each supported line search.
//!
//! Conventions
//! -----------
//! - `DEFAULT_LBFGS_MEM` is the L-BFGS history size when none is configured.
//! - `DEFAULT_SIMPLEX_STEP` is the per-coordinate offset used to build the
//!   initial Nelder–Mead simplex when the model supplies no step sizes.
//! - `DEFAULT_SD_TOLERANCE` is the simplex cost standard deviation that
//!   counts as convergence when no cost tolerance is configured.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    neldermead::NelderMead,
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` in the unconstrained optimizer space.
pub type Theta = Array1<f64>;

/// Gradient vector `∇ℓ(θ)` or `∇c(θ)`, same shape as `Theta`.
pub type Grad = Array1<f64>;

/// Scalar objective value seen by the solver: the cost `c(θ) = -ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Default offset of each initial simplex vertex from `θ₀`.
pub const DEFAULT_SIMPLEX_STEP: f64 = 0.25;

/// Default Nelder–Mead convergence threshold on the simplex cost spread.
pub const DEFAULT_SD_TOLERANCE: f64 = 1e-8;

/// Nelder–Mead simplex solver over `Theta`.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
