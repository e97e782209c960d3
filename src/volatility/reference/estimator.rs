//! Reference estimator — constrained-space Nelder–Mead MLE.
//!
//! Purpose
//! -------
//! Fit a GARCH-family model without the Parameter Transform: the simplex
//! moves directly over (scaled) constrained coefficients, and points outside
//! the variant's domain receive a flat penalty. The filter and likelihood
//! are the slice-based routines of [`super::filter`].
//!
//! Key behaviors
//! -------------
//! - Search coordinates are `x = (μ/sd, ω/ω₀, α, [γ|η], β, [ν, ξ])`, where
//!   `sd` is the sample standard deviation and `ω₀` the starting intercept
//!   (Exponential uses `ω` unscaled).
//! - The simplex is built by perturbing each starting coordinate by a fixed
//!   per-slot offset.
//! - One restart from the best vertex follows a converged first run. The fit
//!   converges only when the restart does too.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned parameters pass `GarchParams::new` for the variant.
//! - Iteration cap, cost tolerance, and timeout are read from the shared
//!   [`GarchOptions`]. The cap and the timeout bound the whole fit: both runs
//!   draw from one budget, and a spent budget ends the fit as
//!   `MaxItersReached` / `Timeout`.
use std::time::{Duration, Instant};

use argmin::{
    core::{CostFunction, Error, Executor, State, TerminationReason, TerminationStatus},
    solver::neldermead::NelderMead,
};
use ndarray::Array1;

use crate::{
    optimization::{
        errors::OptError,
        loglik_optimizer::{MLEOptions, traits::is_converged, types::DEFAULT_SD_TOLERANCE},
        numerical_stability::PERSISTENCE_MARGIN,
    },
    volatility::{
        core::{
            data::ReturnSeries,
            innovations::Innovation,
            likelihood::INFEASIBLE_LOGLIK,
            options::GarchOptions,
            params::{GarchParams, NU_OFFSET},
            recursion::VarianceSequence,
            variant::ModelVariant,
        },
        errors::{GarchError, GarchResult},
        models::{FitDiagnostics, FitResult},
        reference::filter::{Coefficients, filter, loglik},
    },
};

/// Objective value handed to the simplex outside the domain.
const PENALTY: f64 = -INFEASIBLE_LOGLIK;

const MU_STEP: f64 = 0.05;
const OMEGA_STEP_ADDITIVE: f64 = 0.5;
const OMEGA_STEP_LOG: f64 = 0.1;
const COEF_STEP: f64 = 0.03;
const NU_STEP: f64 = 1.0;
const XI_STEP: f64 = 0.1;

/// Scale factors between search coordinates and coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scaling {
    mu: f64,
    omega: f64,
}

/// ReferenceEstimator — constrained-space fitter for one variant and law.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEstimator {
    pub variant: ModelVariant,
    pub law: Innovation,
    pub options: GarchOptions,
}

impl ReferenceEstimator {
    pub fn new(variant: ModelVariant, law: Innovation, options: GarchOptions) -> Self {
        ReferenceEstimator { variant, law, options }
    }

    fn estimates_shape(&self) -> bool {
        self.options.estimate_shape && self.law.is_skewed_t()
    }

    /// Number of estimated parameters `k`.
    pub fn n_params(&self) -> usize {
        self.variant.n_params() + if self.estimates_shape() { 2 } else { 0 }
    }

    /// Fit by maximum likelihood.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InsufficientData` / `DegenerateSeries` for unusable
    ///   series.
    /// - `GarchError::Optimization` when argmin fails, returns no point, or
    ///   returns a point outside the domain (every vertex was infeasible).
    ///
    /// Running out of iterations or time is not an error: the result has
    /// `converged == false`.
    pub fn fit(&self, data: &ReturnSeries) -> GarchResult<FitResult> {
        let k = self.n_params();
        data.require_fit_sample(k)?;
        let returns = data.data.to_vec();

        let start = self.starting_coefficients(data)?;
        let sd = data.variance().sqrt();
        let scaling = Scaling {
            mu: sd,
            omega: if self.variant.is_additive() { start.omega } else { 1.0 },
        };
        let objective = ReferenceObjective { est: self, scaling, returns: &returns };
        let steps = self.steps();

        let x0 = self.encode(&start, &self.law, scaling);
        let mut budget = Budget::new(&self.options.mle_opts);
        let first = self.run_simplex(objective, x0, &steps, &budget)?;
        budget.charge(first.iterations);
        let last = if !is_converged(&first.status) {
            first
        } else if let Some(reason) = budget.exhausted() {
            SimplexRun { status: TerminationStatus::Terminated(reason), ..first }
        } else {
            let second = self.run_simplex(objective, first.x, &steps, &budget)?;
            SimplexRun { iterations: first.iterations + second.iterations, ..second }
        };

        let (coeffs, law) = self
            .decode(&last.x, scaling)
            .ok_or(GarchError::Optimization {
                text: "reference optimum lies outside the parameter domain".to_string(),
            })?;
        let params = GarchParams::new(
            self.variant,
            coeffs.mu,
            coeffs.omega,
            coeffs.alpha,
            coeffs.gamma,
            coeffs.beta,
        )?;
        let filtered = filter(
            self.variant,
            &coeffs,
            law.abs_moment()?,
            &self.options.guards,
            &self.options.init,
            &returns,
        );
        let ll = loglik(&filtered, &law);
        let converged = is_converged(&last.status);
        let status = format!("{:?}", last.status);

        if converged {
            tracing::debug!(
                variant = %self.variant,
                law = law.name(),
                loglik = ll,
                "reference fit converged"
            );
        } else {
            tracing::warn!(
                variant = %self.variant,
                law = law.name(),
                status = %status,
                "reference fit did not converge"
            );
        }

        let variance = VarianceSequence {
            sigma2: Array1::from(filtered.sigma2),
            resid: Array1::from(filtered.resid),
        };
        let diagnostics = FitDiagnostics {
            converged,
            status,
            iterations: last.iterations as usize,
            theta_hat: Array1::from(last.x),
        };
        FitResult::new(params, law, variance, ll, k, self.options.guards, diagnostics)
    }

    fn starting_coefficients(&self, data: &ReturnSeries) -> GarchResult<Coefficients> {
        let mu = data.mean();
        let var = data.variance().max(f64::MIN_POSITIVE);
        let c = match self.variant {
            ModelVariant::Standard => {
                Coefficients { mu, omega: var * 0.04, alpha: 0.08, gamma: 0.0, beta: 0.88 }
            }
            ModelVariant::Gjr => {
                Coefficients { mu, omega: var * 0.05, alpha: 0.04, gamma: 0.06, beta: 0.88 }
            }
            ModelVariant::Exponential => {
                Coefficients { mu, omega: 0.1 * var.ln(), alpha: 0.1, gamma: 0.0, beta: 0.9 }
            }
            ModelVariant::Threshold => {
                let level = 1.0 - 0.88 - 0.08 * self.law.abs_moment()?;
                let omega = var.sqrt() * level.max(0.01);
                Coefficients { mu, omega, alpha: 0.06, gamma: 0.04, beta: 0.88 }
            }
        };
        Ok(c)
    }

    fn steps(&self) -> Vec<f64> {
        let omega_step =
            if self.variant.is_additive() { OMEGA_STEP_ADDITIVE } else { OMEGA_STEP_LOG };
        let mut steps = vec![MU_STEP, omega_step, COEF_STEP];
        if self.variant.has_asymmetry() {
            steps.push(COEF_STEP);
        }
        steps.push(COEF_STEP);
        if self.estimates_shape() {
            steps.extend([NU_STEP, XI_STEP]);
        }
        steps
    }

    fn encode(&self, c: &Coefficients, law: &Innovation, scaling: Scaling) -> Vec<f64> {
        let mut x = vec![c.mu / scaling.mu, c.omega / scaling.omega, c.alpha];
        if self.variant.has_asymmetry() {
            x.push(c.gamma);
        }
        x.push(c.beta);
        if self.estimates_shape() {
            if let Innovation::SkewedT { nu, xi } = *law {
                x.extend([nu, xi]);
            }
        }
        x
    }

    /// Coefficients and law at `x`, or `None` outside the domain.
    fn decode(&self, x: &[f64], scaling: Scaling) -> Option<(Coefficients, Innovation)> {
        if x.len() != self.n_params() {
            return None;
        }
        let (gamma, beta) =
            if self.variant.has_asymmetry() { (x[3], x[4]) } else { (0.0, x[3]) };
        let c = Coefficients {
            mu: x[0] * scaling.mu,
            omega: x[1] * scaling.omega,
            alpha: x[2],
            gamma,
            beta,
        };
        if !c.in_domain(self.variant) {
            return None;
        }
        if self.variant.is_additive() && c.alpha + c.beta >= 1.0 - PERSISTENCE_MARGIN {
            return None;
        }
        let law = if self.estimates_shape() {
            let k = self.variant.n_params();
            let (nu, xi) = (x[k], x[k + 1]);
            if !(nu > NU_OFFSET && xi > 0.0) {
                return None;
            }
            Innovation::skewed_t(nu, xi).ok()?
        } else {
            self.law
        };
        Some((c, law))
    }

    fn run_simplex(
        &self, objective: ReferenceObjective<'_>, x0: Vec<f64>, steps: &[f64], budget: &Budget,
    ) -> GarchResult<SimplexRun> {
        let mut vertices = vec![x0.clone()];
        for (i, h) in steps.iter().enumerate() {
            let mut vertex = x0.clone();
            vertex[i] += h;
            vertices.push(vertex);
        }
        let tol = self.options.mle_opts.tols.tol_cost.unwrap_or(DEFAULT_SD_TOLERANCE);
        let solver: NelderMead<Vec<f64>, f64> =
            NelderMead::new(vertices).with_sd_tolerance(tol).map_err(OptError::from)?;

        let mut executor = Executor::new(objective, solver);
        if let Some(max_iter) = budget.iters_left {
            executor = executor.configure(|state| state.max_iters(max_iter));
        }
        if let Some(timeout) = budget.time_left() {
            executor = executor.timeout(timeout);
        }
        let mut state = executor.run().map_err(OptError::from)?.state().clone();
        let x = state.take_best_param().ok_or(GarchError::Optimization {
            text: "reference optimizer returned no parameters".to_string(),
        })?;
        Ok(SimplexRun {
            x,
            status: state.get_termination_status().clone(),
            iterations: state.get_iter(),
        })
    }
}

struct SimplexRun {
    x: Vec<f64>,
    status: TerminationStatus,
    iterations: u64,
}

/// Wall-clock deadline and iterations left for one fit.
#[derive(Debug, Clone, Copy)]
struct Budget {
    deadline: Option<Instant>,
    iters_left: Option<u64>,
}

impl Budget {
    fn new(opts: &MLEOptions) -> Self {
        Budget {
            deadline: opts.timeout.and_then(|t| Instant::now().checked_add(t)),
            iters_left: opts.tols.max_iter.map(|m| m as u64),
        }
    }

    fn time_left(&self) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(Instant::now()))
    }

    fn charge(&mut self, iterations: u64) {
        if let Some(left) = self.iters_left.as_mut() {
            *left = left.saturating_sub(iterations);
        }
    }

    /// Why no further run may start, if the budget is spent.
    fn exhausted(&self) -> Option<TerminationReason> {
        if self.iters_left == Some(0) {
            Some(TerminationReason::MaxItersReached)
        } else if self.time_left().is_some_and(|t| t.is_zero()) {
            Some(TerminationReason::Timeout)
        } else {
            None
        }
    }
}

/// Negative log-likelihood over the search coordinates.
#[derive(Clone, Copy)]
struct ReferenceObjective<'a> {
    est: &'a ReferenceEstimator,
    scaling: Scaling,
    returns: &'a [f64],
}

impl ReferenceObjective<'_> {
    fn negative_loglik(&self, x: &[f64]) -> f64 {
        let Some((c, law)) = self.est.decode(x, self.scaling) else {
            return PENALTY;
        };
        let Ok(ez) = law.abs_moment() else {
            return PENALTY;
        };
        let opts = &self.est.options;
        let filtered = filter(self.est.variant, &c, ez, &opts.guards, &opts.init, self.returns);
        let ll = loglik(&filtered, &law);
        if ll.is_finite() { -ll } else { PENALTY }
    }
}

impl CostFunction for ReferenceObjective<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.negative_loglik(x))
    }
}
