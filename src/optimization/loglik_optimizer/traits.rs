//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`SolverKind`]: derivative-free Nelder–Mead or gradient-based L-BFGS.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)`. If an analytic gradient is provided, it should be the gradient
//! of the log-likelihood (`∇ℓ(θ)`); the adapter flips the sign as needed.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        types::DEFAULT_SIMPLEX_STEP,
        validation::{
            validate_theta_hat, validate_value, verify_simplex_step, verify_timeout,
            verify_tol_cost, verify_tol_grad,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use std::{str::FromStr, time::Duration};

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject obviously invalid
///   `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇ℓ(θ)`.
///   If not implemented, finite differences are used automatically.
/// - `simplex_steps(&Theta, &Data) -> Option<Theta>`: per-coordinate offsets
///   for the initial Nelder–Mead simplex. `None` uses
///   [`MLEOptions::simplex_step`] for every coordinate.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn simplex_steps(&self, _theta: &Theta, _data: &Self::Data) -> Option<Theta> {
        None
    }
}

/// Solver family used by [`maximize`](crate::optimization::loglik_optimizer::maximize).
///
/// Parsing is case-insensitive: `"NelderMead"` / `"nm"` and `"LBFGS"` /
/// `"L-BFGS"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    #[default]
    NelderMead,
    Lbfgs,
}

impl FromStr for SolverKind {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neldermead" | "nelder-mead" | "nm" => Ok(SolverKind::NelderMead),
            "lbfgs" | "l-bfgs" => Ok(SolverKind::Lbfgs),
            _ => Err(OptError::InvalidSolver {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'NelderMead' or 'LBFGS'.",
            }),
        }
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearcher {
    #[default]
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits. For
///   Nelder–Mead, `tol_cost` is the simplex cost spread that counts as
///   convergence; `tol_grad` only applies to L-BFGS.
/// - `solver: SolverKind` — Nelder–Mead (default) or L-BFGS.
/// - `line_searcher: LineSearcher` — line search used by L-BFGS.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size (default 7).
/// - `simplex_step: f64` — fallback initial simplex offset.
/// - `timeout: Option<Duration>` — wall-clock budget for one run. Hitting it
///   ends the run as not converged.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature).
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub solver: SolverKind,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub simplex_step: f64,
    pub timeout: Option<Duration>,
    pub verbose: bool,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, solver: SolverKind, line_searcher: LineSearcher,
        lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self {
            tols,
            solver,
            line_searcher,
            lbfgs_mem,
            simplex_step: DEFAULT_SIMPLEX_STEP,
            timeout: None,
            verbose: false,
        })
    }

    /// Attach a wall-clock budget.
    ///
    /// # Errors
    /// - [`OptError::InvalidTimeout`] for a zero duration.
    pub fn with_timeout(mut self, timeout: Duration) -> OptResult<Self> {
        verify_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Override the fallback initial simplex offset.
    ///
    /// # Errors
    /// - [`OptError::InvalidSimplexStep`] unless the step is finite and > 0.
    pub fn with_simplex_step(mut self, step: f64) -> OptResult<Self> {
        verify_simplex_step(step)?;
        self.simplex_step = step;
        Ok(self)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-8), max_iter: Some(5000) },
            solver: SolverKind::NelderMead,
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            simplex_step: DEFAULT_SIMPLEX_STEP,
            timeout: None,
            verbose: false,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost (L-BFGS) or the simplex
///   cost spread (Nelder–Mead) falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` only when the solver met its own convergence
///   criterion (or a target cost). Hitting `max_iter`, the timeout, or an
///   interrupt leaves it `false`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad_norm: Option<f64>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let converged = is_converged(&termination);
        let status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
    }
}

/// Map a termination status onto the crate's convergence flag.
pub fn is_converged(status: &TerminationStatus) -> bool {
    matches!(
        status,
        TerminationStatus::Terminated(
            TerminationReason::SolverConverged | TerminationReason::TargetCostReached
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - parsing of `SolverKind` / `LineSearcher`,
    // - validation in `Tolerances::new` and `MLEOptions` builders,
    // - the convergence mapping in `OptimOutcome::new`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Solver and line-search names parse case-insensitively.
    //
    // Given
    // -----
    // - Mixed-case names and one unknown name.
    //
    // Expect
    // ------
    // - Known names parse; the unknown name yields `InvalidSolver`.
    fn solver_and_line_search_names_parse() {
        assert_eq!("NelderMead".parse::<SolverKind>().unwrap(), SolverKind::NelderMead);
        assert_eq!("l-bfgs".parse::<SolverKind>().unwrap(), SolverKind::Lbfgs);
        assert_eq!("HAGERZHANG".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);
        assert!(matches!("bfgs".parse::<SolverKind>(), Err(OptError::InvalidSolver { .. })));
    }

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` rejects empty and invalid configurations.
    //
    // Given
    // -----
    // - All-`None`, a negative tolerance, and a zero iteration cap.
    //
    // Expect
    // ------
    // - The matching `OptError` variant for each case.
    fn tolerances_reject_invalid_configurations() {
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(None, Some(-1.0), None),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(
            Tolerances::new(Some(1e-6), None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Builder methods on `MLEOptions` validate their inputs.
    //
    // Given
    // -----
    // - Zero L-BFGS memory, a zero timeout, and a negative simplex step.
    //
    // Expect
    // ------
    // - Each is rejected; valid values are stored.
    fn mle_options_builders_validate_inputs() {
        let tols = Tolerances::new(None, Some(1e-8), Some(100)).unwrap();
        assert!(matches!(
            MLEOptions::new(tols, SolverKind::Lbfgs, LineSearcher::MoreThuente, Some(0)),
            Err(OptError::InvalidLBFGSMem { .. })
        ));

        let opts =
            MLEOptions::new(tols, SolverKind::NelderMead, LineSearcher::MoreThuente, None).unwrap();
        assert!(matches!(
            opts.clone().with_timeout(Duration::ZERO),
            Err(OptError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            opts.clone().with_simplex_step(-0.1),
            Err(OptError::InvalidSimplexStep { .. })
        ));

        let tuned = opts.with_timeout(Duration::from_secs(2)).unwrap().with_simplex_step(0.5).unwrap();
        assert_eq!(tuned.timeout, Some(Duration::from_secs(2)));
        assert_eq!(tuned.simplex_step, 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Only genuine convergence sets `converged`.
    //
    // Given
    // -----
    // - Outcomes terminated by `SolverConverged`, `MaxItersReached`, and
    //   `Timeout`.
    //
    // Expect
    // ------
    // - `converged` is true only for `SolverConverged`.
    fn outcome_convergence_requires_solver_criterion() {
        let build = |status| {
            OptimOutcome::new(Some(array![0.1, 0.2]), -1.0, status, 10, FnEvalMap::new(), None)
                .unwrap()
        };
        assert!(build(TerminationStatus::Terminated(TerminationReason::SolverConverged)).converged);
        assert!(!build(TerminationStatus::Terminated(TerminationReason::MaxItersReached)).converged);
        assert!(!build(TerminationStatus::Terminated(TerminationReason::Timeout)).converged);
    }

    #[test]
    // Purpose
    // -------
    // Outcome construction rejects missing or non-finite estimates.
    //
    // Given
    // -----
    // - `None` theta and a NaN entry.
    //
    // Expect
    // ------
    // - `MissingThetaHat` and `InvalidThetaHat` respectively.
    fn outcome_rejects_invalid_theta_hat() {
        let status = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        assert_eq!(
            OptimOutcome::new(None, 0.0, status.clone(), 1, FnEvalMap::new(), None),
            Err(OptError::MissingThetaHat)
        );
        assert!(matches!(
            OptimOutcome::new(Some(array![f64::NAN]), 0.0, status, 1, FnEvalMap::new(), None),
            Err(OptError::InvalidThetaHat { index: 0, .. })
        ));
    }
}
