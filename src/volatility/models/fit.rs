//! FitResult — immutable outcome of one estimation run.
//!
//! Purpose
//! -------
//! Carry everything downstream code needs after a fit: the variant, fitted
//! coefficients and innovation law, log-likelihood with AIC/BIC, the
//! convergence flag and optimizer status, the in-sample variance sequence,
//! and the final `(σ², ε, μ)` state that forecasting and path simulation
//! continue from.
//!
//! Key behaviors
//! -------------
//! - Built by either backend through [`FitResult::new`], which derives the
//!   information criteria and the warm-start state.
//! - [`FitResult::forecast`] and [`FitResult::simulate`] continue from the
//!   stored state with the stored guards, so results from both backends are
//!   interchangeable.
//! - A non-converged fit is still a valid result; [`FitResult::ensure_converged`]
//!   turns it into `GarchError::ConvergenceFailed` for callers that need it.
use ndarray::ArrayView1;

use crate::{
    optimization::loglik_optimizer::Theta,
    volatility::{
        core::{
            forecasts::{VarianceForecast, forecast_one_step},
            guards::VarianceGuards,
            init::WarmStart,
            innovations::Innovation,
            likelihood::InfoCriteria,
            params::GarchParams,
            recursion::VarianceSequence,
            simulation::{SimulatedPath, simulate_path},
            variant::ModelVariant,
        },
        errors::{GarchError, GarchResult},
    },
};

/// Optimizer-side facts about a fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitDiagnostics {
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    /// Optimizer vector at the optimum.
    pub theta_hat: Theta,
}

/// FitResult — fitted model, scores, convergence, and final state.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub variant: ModelVariant,
    pub params: GarchParams,
    /// Innovation law at the optimum (estimated shape when applicable).
    pub law: Innovation,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub n_obs: usize,
    /// Number of estimated parameters `k`.
    pub n_params: usize,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    /// Optimizer vector at the optimum, in the producing backend's own
    /// coordinates.
    pub theta_hat: Theta,
    /// Guards used in estimation; reused by forecast and simulation.
    pub guards: VarianceGuards,
    /// In-sample conditional variances and residuals.
    pub variance: VarianceSequence,
    /// Final `(σ², ε, μ)` state.
    pub last_state: WarmStart,
}

impl FitResult {
    /// Assemble a result from fitted parameters and their variance sequence.
    ///
    /// Errors
    /// ------
    /// - `GarchError::EmptySeries` / `InvalidWarmStart` if the sequence has no
    ///   usable final state.
    pub fn new(
        params: GarchParams, law: Innovation, variance: VarianceSequence, log_likelihood: f64,
        n_params: usize, guards: VarianceGuards, diagnostics: FitDiagnostics,
    ) -> GarchResult<Self> {
        let n_obs = variance.len();
        let last_state = variance.last_state(params.mu)?;
        let ic = InfoCriteria::new(log_likelihood, n_params, n_obs);
        Ok(FitResult {
            variant: params.variant,
            params,
            law,
            log_likelihood,
            aic: ic.aic,
            bic: ic.bic,
            n_obs,
            n_params,
            converged: diagnostics.converged,
            status: diagnostics.status,
            iterations: diagnostics.iterations,
            theta_hat: diagnostics.theta_hat,
            guards,
            variance,
            last_state,
        })
    }

    pub fn info_criteria(&self) -> InfoCriteria {
        InfoCriteria { aic: self.aic, bic: self.bic, log_likelihood: self.log_likelihood }
    }

    /// Borrow the result only if the optimizer converged.
    ///
    /// Errors
    /// ------
    /// - `GarchError::ConvergenceFailed { status }` otherwise.
    pub fn ensure_converged(&self) -> GarchResult<&Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(GarchError::ConvergenceFailed { status: self.status.clone() })
        }
    }

    pub fn warm_start(&self) -> WarmStart {
        self.last_state
    }

    /// `E|z|` of the fitted law.
    pub fn abs_moment(&self) -> GarchResult<f64> {
        Ok(self.law.abs_moment()?)
    }

    /// One-step-ahead forecast from the final state.
    pub fn forecast(&self) -> GarchResult<VarianceForecast> {
        Ok(forecast_one_step(&self.params, self.abs_moment()?, &self.guards, &self.last_state))
    }

    /// Simulate `horizon` steps from the final state with supplied innovations.
    ///
    /// Errors
    /// ------
    /// - See [`simulate_path`].
    pub fn simulate(
        &self, innovations: ArrayView1<f64>, horizon: usize,
    ) -> GarchResult<SimulatedPath> {
        simulate_path(
            &self.params,
            self.abs_moment()?,
            &self.guards,
            &self.last_state,
            innovations,
            horizon,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::{
        init::Init,
        recursion::{Start, compute_variance},
    };
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    fn sample_fit(converged: bool) -> FitResult {
        let p = GarchParams::new(ModelVariant::Standard, 1e-3, 2e-6, 0.08, 0.0, 0.9).unwrap();
        let g = VarianceGuards::default();
        let r = array![0.011, -0.019, 0.001, 0.004, -0.007];
        let seq = compute_variance(r.view(), &p, 0.0, &Start::Fresh(Init::SampleVariance), &g);
        let diag = FitDiagnostics {
            converged,
            status: "MaxItersReached".into(),
            iterations: 7,
            theta_hat: p.to_theta(),
        };
        FitResult::new(p, Innovation::Normal, seq, 12.5, 4, g, diag).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Construction derives scores and the final state.
    //
    // Given
    // -----
    // - A 5-point Standard filter with LL = 12.5 and k = 4.
    //
    // Expect
    // ------
    // - AIC = -17, BIC = -25 + 4 ln 5, last state = final (σ², ε) and μ.
    fn new_derives_scores_and_state() {
        let fit = sample_fit(true);
        assert_relative_eq!(fit.aic, -17.0);
        assert_relative_eq!(fit.bic, -25.0 + 4.0 * 5f64.ln());
        assert_eq!(fit.last_state.sigma2, fit.variance.sigma2[4]);
        assert_relative_eq!(fit.last_state.resid, -0.008, epsilon = 1e-15);
        assert_eq!(fit.info_criteria().log_likelihood, 12.5);
    }

    #[test]
    // Purpose
    // -------
    // Non-converged fits are returned but can be rejected on demand.
    //
    // Given
    // -----
    // - A fit flagged `converged = false`.
    //
    // Expect
    // ------
    // - `ensure_converged` yields `ConvergenceFailed` with the status; the
    //   forecast and simulation still work.
    fn non_converged_fit_is_usable_but_flagged() {
        let fit = sample_fit(false);
        assert_eq!(
            fit.ensure_converged().unwrap_err(),
            GarchError::ConvergenceFailed { status: "MaxItersReached".into() }
        );
        let f = fit.forecast().unwrap();
        assert!(f.sigma2 > 0.0);
        let path = fit.simulate(Array1::<f64>::zeros(3).view(), 3).unwrap();
        assert_relative_eq!(path.returns[0], fit.params.mu);
        assert_relative_eq!(path.sigma2[0], f.sigma2);
    }
}
