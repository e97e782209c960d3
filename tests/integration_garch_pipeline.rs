//! Integration tests for the GARCH engine pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: simulated returns → fit on the manual
//!   backend → one-step forecast → 50-step path from supplied innovations,
//!   compared against the reference backend on the same inputs.
//! - Exercise the public engine surface only (`Engine`, `FitHandle`,
//!   `fit_batch`), the way downstream callers use it.
//!
//! Coverage
//! --------
//! - `volatility::engine`: fit / path / forecast / converged / info-criteria
//!   on both engines, and cross-engine use of a handle.
//! - `volatility::core::simulation`: seeded innovation draws and paths.
//! - `volatility::batch`: a mixed sweep over several variants.
//!
//! Exclusions
//! ----------
//! - Per-variant parity and kernel details: see `conformance_backends.rs` and
//!   the unit tests.
//! - Python bindings.
use rust_garch::volatility::{
    core::{
        guards::VarianceGuards,
        init::WarmStart,
        innovations::Innovation,
        params::GarchParams,
        simulation::{draw_innovations, simulate_path},
        variant::ModelVariant,
    },
    BatchOutcome, Engine, EngineKind, FitJob, ReturnSeries, fit_batch,
};

/// Purpose
/// -------
/// Simulate `n` Standard-variant returns with Normal innovations.
///
/// Parameters
/// ----------
/// - `params`: generating Standard-variant parameters (α + β < 1).
/// - `n`: series length.
/// - `seed`: innovation seed.
///
/// Returns
/// -------
/// - A `ReturnSeries` started from the unconditional variance.
fn standard_returns(params: &GarchParams, n: usize, seed: u64) -> ReturnSeries {
    let z = draw_innovations(&Innovation::Normal, n, seed);
    let uncond = params.omega / (1.0 - params.alpha - params.beta);
    let warm = WarmStart::new(uncond, 0.0, params.mu).expect("valid warm start");
    let ez = Innovation::Normal.abs_moment().expect("Normal E|z|");
    let path = simulate_path(params, ez, &VarianceGuards::default(), &warm, z.view(), n)
        .expect("simulation succeeds for valid inputs");
    ReturnSeries::new(path.returns).expect("simulated returns are finite")
}

fn truth() -> GarchParams {
    GarchParams::new(ModelVariant::Standard, 5e-4, 2e-6, 0.08, 0.0, 0.9)
        .expect("valid Standard parameters")
}

#[test]
// Purpose
// -------
// Fit, forecast and simulate on the manual engine, then check the
// reference engine reproduces the path from the same fit and innovations.
//
// Given
// -----
// - 2000 Standard-variant returns (seed 123).
// - A manual fit with Normal innovations.
// - 50 Normal innovations drawn independently (seed 456).
//
// Expect
// ------
// - The fit converges with finite LL, AIC < BIC (n = 2000 > e²).
// - Simulated variances are finite and non-negative.
// - Manual and reference paths from the same handle differ by less than
//   2e-3 in mean absolute return.
fn standard_fit_then_path_matches_reference() {
    let data = standard_returns(&truth(), 2000, 123);
    let manual = Engine::with_defaults(EngineKind::Manual);
    let reference = Engine::with_defaults(EngineKind::Reference);

    let handle = manual.fit(ModelVariant::Standard, Innovation::Normal, &data).unwrap();
    assert!(manual.converged(&handle), "status: {}", handle.result.status);
    let ic = manual.info_criteria(&handle);
    assert!(ic.log_likelihood.is_finite());
    assert!(ic.aic < ic.bic);

    let forecast = manual.forecast(&handle).unwrap();
    assert!(forecast.sigma2.is_finite() && forecast.sigma2 > 0.0);
    assert_eq!(forecast.mean, handle.result.params.mu);

    let z = draw_innovations(&Innovation::Normal, 50, 456);
    let path_manual = manual.path(&handle, z.view(), 50).unwrap();
    let path_reference = reference.path(&handle, z.view(), 50).unwrap();

    assert_eq!(path_manual.len(), 50);
    assert!(path_manual.sigma2.iter().all(|s| s.is_finite() && *s >= 0.0));
    assert!(path_reference.sigma2.iter().all(|s| s.is_finite() && *s >= 0.0));
    assert!(path_manual.mean_abs_diff(&path_reference) < 2e-3);
    assert_eq!(path_manual.sigma2[0], forecast.sigma2);
}

#[test]
// Purpose
// -------
// Independent fits on the two engines land on the same optimum closely
// enough that their paths agree.
//
// Given
// -----
// - The same 2000-point series (seed 123) fitted on each engine.
// - 50 Normal innovations (seed 456).
//
// Expect
// ------
// - Log-likelihoods within 1.0 of each other.
// - α and β within 0.05 across engines.
// - Paths from each engine's own fit differ by less than 2e-3 MAE.
fn independent_fits_agree_across_engines() {
    let data = standard_returns(&truth(), 2000, 123);
    let manual = Engine::with_defaults(EngineKind::Manual);
    let reference = Engine::with_defaults(EngineKind::Reference);

    let h_manual = manual.fit(ModelVariant::Standard, Innovation::Normal, &data).unwrap();
    let h_reference = reference.fit(ModelVariant::Standard, Innovation::Normal, &data).unwrap();
    assert_eq!(h_reference.engine, EngineKind::Reference);

    let (a, b) = (&h_manual.result, &h_reference.result);
    assert!(
        (a.log_likelihood - b.log_likelihood).abs() < 1.0,
        "LL manual = {}, reference = {}",
        a.log_likelihood,
        b.log_likelihood
    );
    assert!((a.params.alpha - b.params.alpha).abs() < 0.05);
    assert!((a.params.beta - b.params.beta).abs() < 0.05);

    let z = draw_innovations(&Innovation::Normal, 50, 456);
    let p_manual = manual.path(&h_manual, z.view(), 50).unwrap();
    let p_reference = reference.path(&h_reference, z.view(), 50).unwrap();
    assert!(p_manual.mean_abs_diff(&p_reference) < 2e-3);
}

#[test]
// Purpose
// -------
// A sweep over several variants and one unusable series reports every job.
//
// Given
// -----
// - One 1000-point series fitted as Standard, GJR and Threshold, plus a
//   25-point series.
//
// Expect
// ------
// - Four outcomes in order; the short job fails with `InsufficientData`;
//   the others carry handles with finite log-likelihoods.
fn batch_sweep_reports_every_job() {
    let data = standard_returns(&truth(), 1000, 7);
    let short = ReturnSeries::from_slice(&data.data.as_slice().unwrap()[..25]).unwrap();
    let engine = Engine::with_defaults(EngineKind::Manual);
    let jobs = vec![
        FitJob::new("asset/sGARCH", ModelVariant::Standard, Innovation::Normal, data.clone()),
        FitJob::new("asset/gjrGARCH", ModelVariant::Gjr, Innovation::Normal, data.clone()),
        FitJob::new("asset/TGARCH", ModelVariant::Threshold, Innovation::Normal, data),
        FitJob::new("short/sGARCH", ModelVariant::Standard, Innovation::Normal, short),
    ];

    let outcomes = fit_batch(&engine, jobs);

    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes[..3] {
        match outcome {
            BatchOutcome::Fitted { handle, .. } | BatchOutcome::NotConverged { handle, .. } => {
                assert!(handle.result.log_likelihood.is_finite())
            }
            BatchOutcome::Failed { label, error } => panic!("{label} failed: {error}"),
        }
    }
    assert_eq!(outcomes[3].label(), "short/sGARCH");
    assert!(matches!(outcomes[3], BatchOutcome::Failed { .. }));
}
