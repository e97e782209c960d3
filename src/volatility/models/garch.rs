//! GARCH-family model for the manual backend: unconstrained likelihood + fit.
//!
//! This module wires a [`ModelVariant`] and an [`Innovation`] law to the
//! [`LogLikelihood`] trait. Each evaluation maps `θ` through the Parameter
//! Transform ([`ParamLayout::decode`]), filters the series with
//! [`compute_variance`], and scores it with [`log_likelihood`].
//!
//! Key ideas:
//! - The optimizer searches the whole of `ℝᵏ`; the transform guarantees a
//!   valid parameter set for every finite `θ`, so no evaluation is rejected.
//! - Infeasible numerics (a non-finite total) are reported as
//!   [`INFEASIBLE_LOGLIK`] so the simplex moves away instead of aborting.
//! - Nelder–Mead is the default solver; its initial simplex scales the μ
//!   offset to the sample standard deviation.
use ndarray::Array1;

use crate::{
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{LogLikelihood, Theta, maximize},
    },
    volatility::{
        core::{
            data::ReturnSeries,
            innovations::Innovation,
            likelihood::{INFEASIBLE_LOGLIK, log_likelihood},
            options::GarchOptions,
            params::{GarchParams, ParamLayout},
            recursion::{Start, VarianceSequence, compute_variance},
            variant::ModelVariant,
        },
        errors::GarchResult,
        models::fit::{FitDiagnostics, FitResult},
    },
};

/// Relative size of the initial μ offset against the sample standard deviation.
const MU_STEP_SCALE: f64 = 0.1;

/// GARCH-family model estimated in unconstrained coordinates.
///
/// Holds no per-fit state; a single instance can fit many series, including
/// concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchModel {
    pub variant: ModelVariant,
    /// Innovation law; for an estimated skewed-t, its `(ν, ξ)` are the
    /// starting values.
    pub law: Innovation,
    pub options: GarchOptions,
}

impl GarchModel {
    pub fn new(variant: ModelVariant, law: Innovation, options: GarchOptions) -> GarchModel {
        GarchModel { variant, law, options }
    }

    pub fn layout(&self) -> ParamLayout {
        ParamLayout::new(self.variant, &self.law, self.options.estimate_shape)
    }

    /// Number of estimated parameters `k`.
    pub fn n_params(&self) -> usize {
        self.layout().len()
    }

    /// Moment-based starting vector.
    pub fn initial_theta(&self, data: &ReturnSeries) -> GarchResult<Theta> {
        let params =
            GarchParams::starting_values(self.variant, data, self.law.abs_moment()?)?;
        Ok(self.layout().encode(&params, &self.law))
    }

    /// Filter `data` under constrained parameters and a law.
    pub fn filter(
        &self, params: &GarchParams, law: &Innovation, data: &ReturnSeries,
    ) -> GarchResult<VarianceSequence> {
        Ok(compute_variance(
            data.data.view(),
            params,
            law.abs_moment()?,
            &Start::Fresh(self.options.init),
            &self.options.guards,
        ))
    }

    /// Fit by maximum likelihood.
    ///
    /// ## Steps
    /// 1. Check the sample supports `k` parameters.
    /// 2. Maximize from `theta0` (or moment-based starting values).
    /// 3. Decode `θ̂`, re-filter the series at the optimum, and assemble a
    ///    [`FitResult`].
    ///
    /// ## Errors
    /// - `GarchError::InsufficientData` / `DegenerateSeries` for unusable
    ///   series.
    /// - `GarchError::Optimization` when the optimizer itself fails.
    ///
    /// Running out of iterations or time is **not** an error: the result has
    /// `converged == false` and a warning is logged.
    pub fn fit(&self, data: &ReturnSeries, theta0: Option<Theta>) -> GarchResult<FitResult> {
        let layout = self.layout();
        data.require_fit_sample(layout.len())?;
        let theta0 = match theta0 {
            Some(theta) => theta,
            None => self.initial_theta(data)?,
        };

        let outcome = maximize(self, theta0, data, &self.options.mle_opts)?;
        let (params, law) = layout.decode(outcome.theta_hat.view(), &self.law)?;
        let variance = self.filter(&params, &law, data)?;
        let ll = log_likelihood(&variance, &law);

        if outcome.converged {
            tracing::debug!(
                variant = %self.variant,
                law = law.name(),
                loglik = ll,
                iterations = outcome.iterations,
                "fit converged"
            );
        } else {
            tracing::warn!(
                variant = %self.variant,
                law = law.name(),
                status = %outcome.status,
                iterations = outcome.iterations,
                "fit did not converge"
            );
        }

        let diagnostics = FitDiagnostics {
            converged: outcome.converged,
            status: outcome.status,
            iterations: outcome.iterations,
            theta_hat: outcome.theta_hat,
        };
        FitResult::new(params, law, variance, ll, layout.len(), self.options.guards, diagnostics)
    }
}

impl LogLikelihood for GarchModel {
    type Data = ReturnSeries;

    /// Log-likelihood at `θ`: decode → filter → score.
    ///
    /// A non-finite `θ` (line-search trial points can overshoot) scores
    /// [`INFEASIBLE_LOGLIK`]; a wrong length is still an error.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let layout = self.layout();
        if theta.len() != layout.len() {
            return Err(OptError::ThetaLengthMismatch {
                expected: layout.len(),
                actual: theta.len(),
            });
        }
        let Ok((params, law)) = layout.decode(theta.view(), &self.law) else {
            return Ok(INFEASIBLE_LOGLIK);
        };
        let ll = log_likelihood(&self.filter(&params, &law, data)?, &law);
        Ok(if ll.is_finite() { ll } else { INFEASIBLE_LOGLIK })
    }

    /// Length/finiteness of `θ` and fit-sample size of the data.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        let layout = self.layout();
        if theta.len() != layout.len() {
            return Err(OptError::ThetaLengthMismatch {
                expected: layout.len(),
                actual: theta.len(),
            });
        }
        layout.decode(theta.view(), &self.law)?;
        data.require_fit_sample(layout.len())?;
        Ok(())
    }

    /// μ moves on the scale of the data; every other coordinate uses the
    /// configured simplex step.
    fn simplex_steps(&self, theta: &Theta, data: &Self::Data) -> Option<Theta> {
        let step = self.options.mle_opts.simplex_step;
        let mut steps = Array1::from_elem(theta.len(), step);
        let sd = data.variance().sqrt();
        if let Some(first) = steps.first_mut() {
            *first = if sd > 0.0 { MU_STEP_SCALE * sd } else { step };
        }
        Some(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::loglik_optimizer::{LineSearcher, MLEOptions, SolverKind, Tolerances},
        volatility::{
            core::{
                guards::VarianceGuards,
                init::WarmStart,
                simulation::{draw_innovations, simulate_path},
            },
            errors::GarchError,
        },
    };
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - sample-size gating before optimization,
    // - the likelihood at θ equals the direct filter-and-score computation,
    // - recovery of known Standard-variant parameters from simulated data,
    // - shape estimation for a skewed-t law,
    // - non-finite trial points and L-BFGS fits under both line searches.
    // -------------------------------------------------------------------------

    fn simulated_returns(params: &GarchParams, n: usize, seed: u64) -> ReturnSeries {
        let z = draw_innovations(&Innovation::Normal, n, seed);
        let uncond = params.omega / (1.0 - params.alpha - params.beta);
        let warm = WarmStart::new(uncond, 0.0, params.mu).unwrap();
        let ez = Innovation::Normal.abs_moment().unwrap();
        let path = simulate_path(params, ez, &VarianceGuards::default(), &warm, z.view(), n)
            .unwrap();
        ReturnSeries::new(path.returns).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A series too short for the parameter count is rejected before fitting.
    //
    // Given
    // -----
    // - 45 returns and a GJR model with an estimated skewed-t (k = 7 → 70).
    //
    // Expect
    // ------
    // - `InsufficientData { len: 45, required: 70 }`.
    fn fit_rejects_short_series() {
        let data = ReturnSeries::new(Array1::linspace(-0.01, 0.01, 45)).unwrap();
        let law = Innovation::skewed_t(8.0, 1.0).unwrap();
        let model = GarchModel::new(ModelVariant::Gjr, law, GarchOptions::default());
        assert_eq!(
            model.fit(&data, None).unwrap_err(),
            GarchError::InsufficientData { len: 45, required: 70 }
        );
    }

    #[test]
    // Purpose
    // -------
    // `value` equals the filter-and-score computation at the decoded point.
    //
    // Given
    // -----
    // - Simulated Standard data and θ encoded from known parameters.
    //
    // Expect
    // ------
    // - Identical log-likelihoods.
    fn value_matches_direct_computation() {
        let p = GarchParams::new(ModelVariant::Standard, 5e-4, 2e-6, 0.08, 0.0, 0.9).unwrap();
        let data = simulated_returns(&p, 300, 7);
        let law = Innovation::Normal;
        let model = GarchModel::new(ModelVariant::Standard, law, GarchOptions::default());
        let theta = model.layout().encode(&p, &law);

        let direct = log_likelihood(&model.filter(&p, &law, &data).unwrap(), &law);
        assert_relative_eq!(model.value(&theta, &data).unwrap(), direct, max_relative = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // MLE recovers the generating Standard-variant parameters.
    //
    // Given
    // -----
    // - 2000 returns from μ = 5e-4, ω = 2e-6, α = 0.08, β = 0.9 (seed 123).
    //
    // Expect
    // ------
    // - Converged; α and β within 0.06 of truth; α + β < 1; the fitted LL is
    //   not materially below the LL at the true parameters.
    fn fit_recovers_standard_parameters() {
        let truth = GarchParams::new(ModelVariant::Standard, 5e-4, 2e-6, 0.08, 0.0, 0.9).unwrap();
        let data = simulated_returns(&truth, 2000, 123);
        let model =
            GarchModel::new(ModelVariant::Standard, Innovation::Normal, GarchOptions::default());

        let fit = model.fit(&data, None).unwrap();

        assert!(fit.converged, "status: {}", fit.status);
        assert!((fit.params.alpha - 0.08).abs() < 0.06, "alpha = {}", fit.params.alpha);
        assert!((fit.params.beta - 0.9).abs() < 0.06, "beta = {}", fit.params.beta);
        assert!(fit.params.alpha + fit.params.beta < 1.0);
        let ll_truth = log_likelihood(
            &model.filter(&truth, &Innovation::Normal, &data).unwrap(),
            &Innovation::Normal,
        );
        assert!(fit.log_likelihood >= ll_truth - 0.5);
        assert_eq!(fit.n_params, 4);
        assert_eq!(fit.variance.len(), 2000);
    }

    #[test]
    // Purpose
    // -------
    // A skewed-t fit estimates shape and skew inside their domain.
    //
    // Given
    // -----
    // - 800 Standard-variant returns and an sstd law starting at (8, 1).
    //
    // Expect
    // ------
    // - k = 6; ν > 2.1 and ξ > 0; finite LL.
    fn skewed_t_fit_estimates_shape() {
        let truth = GarchParams::new(ModelVariant::Standard, 0.0, 4e-6, 0.06, 0.0, 0.9).unwrap();
        let data = simulated_returns(&truth, 800, 99);
        let law = Innovation::skewed_t(8.0, 1.0).unwrap();
        let model = GarchModel::new(ModelVariant::Standard, law, GarchOptions::default());

        let fit = model.fit(&data, None).unwrap();

        assert_eq!(fit.n_params, 6);
        assert!(fit.log_likelihood.is_finite());
        match fit.law {
            Innovation::SkewedT { nu, xi } => assert!(nu > 2.1 && xi > 0.0),
            Innovation::Normal => panic!("law lost its shape"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Non-finite trial points score as infeasible instead of failing, while a
    // malformed vector is still rejected.
    //
    // Given
    // -----
    // - A GJR model on simulated data; θ with a NaN, with −∞, and of the
    //   wrong length.
    //
    // Expect
    // ------
    // - `INFEASIBLE_LOGLIK` for the non-finite vectors; `ThetaLengthMismatch`
    //   for the short one; `check` still rejects the NaN vector.
    fn value_scores_non_finite_theta_as_infeasible() {
        let p = GarchParams::new(ModelVariant::Standard, 5e-4, 2e-6, 0.08, 0.0, 0.9).unwrap();
        let data = simulated_returns(&p, 300, 11);
        let model = GarchModel::new(ModelVariant::Gjr, Innovation::Normal, GarchOptions::default());

        let nan = Array1::from(vec![f64::NAN, -12.0, -2.0, 0.0, 2.0]);
        let neg_inf = Array1::from(vec![0.0, f64::NEG_INFINITY, -2.0, 0.0, 2.0]);
        assert_eq!(model.value(&nan, &data).unwrap(), INFEASIBLE_LOGLIK);
        assert_eq!(model.value(&neg_inf, &data).unwrap(), INFEASIBLE_LOGLIK);
        assert!(model.check(&nan, &data).is_err());

        let short = Array1::from(vec![0.0, -12.0, -2.0]);
        assert_eq!(
            model.value(&short, &data).unwrap_err(),
            OptError::ThetaLengthMismatch { expected: 5, actual: 3 }
        );
    }

    #[test]
    // Purpose
    // -------
    // L-BFGS fits converge for every variant under both line searches.
    //
    // Given
    // -----
    // - 2000 Standard-variant returns (seed 123).
    // - L-BFGS with More–Thuente, then with Hager–Zhang.
    //
    // Expect
    // ------
    // - Every fit converges with a finite log-likelihood.
    fn lbfgs_fits_converge_with_each_line_search() {
        let truth = GarchParams::new(ModelVariant::Standard, 5e-4, 2e-6, 0.08, 0.0, 0.9).unwrap();
        let data = simulated_returns(&truth, 2000, 123);
        let tols = Tolerances::new(Some(1e-6), Some(1e-8), Some(5000)).unwrap();

        for searcher in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let mle = MLEOptions::new(tols, SolverKind::Lbfgs, searcher, None).unwrap();
            let options = GarchOptions::default().with_mle_opts(mle);
            for variant in [
                ModelVariant::Standard,
                ModelVariant::Gjr,
                ModelVariant::Exponential,
                ModelVariant::Threshold,
            ] {
                let model = GarchModel::new(variant, Innovation::Normal, options.clone());
                let fit = model.fit(&data, None).unwrap();
                assert!(fit.converged, "{variant} with {searcher:?}: {}", fit.status);
                assert!(fit.log_likelihood.is_finite());
            }
        }
    }
}
