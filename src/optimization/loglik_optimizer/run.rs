//! Execution helpers that run an `argmin` solver on a log-likelihood problem
//! and return a crate-friendly [`OptimOutcome`].
//!
//! Both runners apply the same executor configuration: initial parameters,
//! optional `max_iters`, optional wall-clock timeout, and (behind the
//! `obs_slog` feature) a terminal observer when `opts.verbose` is set.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
use argmin::core::{CostFunction, Executor, IterState, Solver, State};
use argmin_math::ArgminL2Norm;

/// Solver state for gradient-based runs.
pub type GradState = IterState<Theta, Grad, (), (), (), f64>;

/// Solver state for derivative-free runs.
pub type SimplexState = IterState<Theta, (), (), (), (), f64>;

/// Run a gradient-based solver (L-BFGS with either line search).
///
/// # Errors
/// - Argmin runtime errors (line-search failures, model errors raised inside
///   the cost) via `From<argmin::core::Error>`.
/// - Validation errors when building the [`OptimOutcome`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, GradState> + Send + 'static,
{
    log_initial_state(&theta0, &problem, opts)?;
    let mut optimizer = Executor::new(problem, solver).configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }
    if let Some(timeout) = opts.timeout {
        optimizer = optimizer.timeout(timeout);
    }

    let mut result = optimizer.run()?.state().clone();
    let grad_norm = result.take_gradient().map(|g| g.l2_norm());
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        result.get_termination_status().clone(),
        result.get_iter(),
        result.get_func_counts().clone(),
        grad_norm,
    )
}

/// Run the Nelder–Mead simplex solver.
///
/// The initial parameter is carried by the simplex itself; `theta0` is still
/// set on the state so observers report it.
///
/// # Errors
/// Same as [`run_lbfgs`].
pub fn run_nelder_mead<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, SimplexState> + Send + 'static,
{
    log_initial_state(&theta0, &problem, opts)?;
    let mut optimizer = Executor::new(problem, solver).configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }
    if let Some(timeout) = opts.timeout {
        optimizer = optimizer.timeout(timeout);
    }

    let mut result = optimizer.run()?.state().clone();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        result.get_termination_status().clone(),
        result.get_iter(),
        result.get_func_counts().clone(),
        None,
    )
}

// ---- Helper Methods ----

fn log_initial_state<F>(
    theta0: &Theta, problem: &ArgMinAdapter<'_, F>, opts: &MLEOptions,
) -> OptResult<()>
where
    F: LogLikelihood,
{
    if !opts.verbose {
        return Ok(());
    }
    let ll0 = -problem.cost(theta0)?;
    tracing::info!(loglik = ll0, dim = theta0.len(), solver = ?opts.solver, "optimizer start");
    Ok(())
}
