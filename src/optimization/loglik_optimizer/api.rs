//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! Dispatches on [`SolverKind`]: Nelder–Mead builds a simplex around `θ₀`
//! (using model-supplied offsets when available); L-BFGS selects the
//! configured line search. Either way the model is wrapped in an
//! `ArgMinAdapter`, which *minimizes* `-ℓ(θ)`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_nelder_mead, build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::{run_lbfgs, run_nelder_mead},
        traits::{LineSearcher, LogLikelihood, MLEOptions, SolverKind},
    },
};

/// Maximize a log-likelihood `ℓ(θ)`.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Builds the solver selected by `opts.solver`.
/// - Runs it with `opts.tols.max_iter` and `opts.timeout` applied.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors (bad tolerances, bad simplex offsets).
/// - Propagates runtime errors (e.g., line-search failures).
///
/// # Returns
/// An [`OptimOutcome`]. Running out of iterations or time is **not** an
/// error; it is reported through `converged == false`.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_garch::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta},
/// };
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_garch::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.solver {
        SolverKind::NelderMead => {
            let steps = f.simplex_steps(&theta0, data);
            let solver = build_nelder_mead(&theta0, steps.as_ref(), opts)?;
            run_nelder_mead(theta0, opts, problem, solver)
        }
        SolverKind::Lbfgs => match opts.line_searcher {
            LineSearcher::MoreThuente => {
                let solver = build_optimizer_more_thuente(opts)?;
                run_lbfgs(theta0, opts, problem, solver)
            }
            LineSearcher::HagerZhang => {
                let solver = build_optimizer_hager_zhang(opts)?;
                run_lbfgs(theta0, opts, problem, solver)
            }
        },
    }
}
