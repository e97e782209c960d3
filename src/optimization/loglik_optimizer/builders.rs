//! loglik_optimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small builders for the solvers used by the log-likelihood
//! optimizer. These hide Argmin's generic wiring and apply crate-level
//! options (tolerances, memory size, simplex offsets) so higher-level code can
//! request a configured solver without touching Argmin types.
//!
//! Key behaviors
//! -------------
//! - Construct a Nelder–Mead solver from `θ₀` plus per-coordinate offsets,
//!   with its convergence threshold taken from `tol_cost`.
//! - Construct L-BFGS solvers with either Hager–Zhang or More–Thuente line
//!   search and apply optional gradient / cost tolerances.
//! - Leave `max_iters` and the timeout to the runner layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - The initial simplex has `n + 1` vertices for `n = θ₀.len()`: `θ₀` itself
//!   and `θ₀ + hᵢ eᵢ` for each coordinate `i`.
//! - Invalid tolerances rejected by Argmin surface as [`OptError`] through
//!   the crate's `From<Error>` conversion.
//!
//! Testing notes
//! -------------
//! - Unit tests check construction for every solver path, simplex offset
//!   validation, and tolerance wiring. End-to-end behavior is covered by the
//!   runner tests in [`super::api`].
use argmin::solver::{neldermead::NelderMead, quasinewton::LBFGS};

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, DEFAULT_SD_TOLERANCE, Grad, HagerZhangLS, LbfgsHagerZhang,
            LbfgsMoreThuente, MoreThuenteLS, NelderMeadSolver, Theta,
        },
        validation::{validate_steps, verify_simplex_step},
    },
};

/// build_nelder_mead — construct a Nelder–Mead solver around `θ₀`.
///
/// Parameters
/// ----------
/// - `theta0`: starting point; becomes the first simplex vertex.
/// - `steps`: optional per-coordinate offsets supplied by the model. When
///   `None`, `opts.simplex_step` is used for every coordinate.
/// - `opts`: source of `simplex_step` and `tols.tol_cost` (the simplex cost
///   spread that counts as convergence; defaults to
///   [`DEFAULT_SD_TOLERANCE`]).
///
/// Errors
/// ------
/// - `OptError::ThetaLengthMismatch` / `OptError::InvalidSimplexStep` for bad
///   offsets.
/// - Argmin configuration errors via `From<argmin::core::Error>`.
pub fn build_nelder_mead(
    theta0: &Theta, steps: Option<&Theta>, opts: &MLEOptions,
) -> OptResult<NelderMeadSolver> {
    let dim = theta0.len();
    match steps {
        Some(s) => validate_steps(s, dim)?,
        None => verify_simplex_step(opts.simplex_step)?,
    }

    let mut vertices: Vec<Theta> = Vec::with_capacity(dim + 1);
    vertices.push(theta0.clone());
    for i in 0..dim {
        let h = steps.map_or(opts.simplex_step, |s| s[i]);
        let mut vertex = theta0.clone();
        vertex[i] += h;
        vertices.push(vertex);
    }

    let tol = opts.tols.tol_cost.unwrap_or(DEFAULT_SD_TOLERANCE);
    let solver = NelderMead::new(vertices).with_sd_tolerance(tol)?;
    Ok(solver)
}

/// build_optimizer_hager_zhang — construct L-BFGS with Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` (or [`DEFAULT_LBFGS_MEM`]) and applies any gradient /
/// cost tolerances through [`configure_lbfgs`].
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// build_optimizer_more_thuente — construct L-BFGS with More–Thuente line search.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// configure_lbfgs — apply optional tolerances to an L-BFGS solver.
///
/// When a tolerance is `None`, the corresponding `with_tolerance_*` method is
/// not called and Argmin's default stays in effect.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::traits::{LineSearcher, SolverKind, Tolerances},
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of Nelder–Mead solvers with default and model-supplied
    //   simplex offsets.
    // - Construction of L-BFGS solvers for both line searches.
    // - Application of gradient and cost tolerances via `configure_lbfgs`.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior, which is tested through `maximize`.
    // -------------------------------------------------------------------------

    fn opts(solver: SolverKind, ls: LineSearcher, mem: Option<usize>) -> MLEOptions {
        let tols = Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).unwrap();
        MLEOptions::new(tols, solver, ls, mem).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Nelder–Mead builds from the fallback step and from explicit offsets.
    //
    // Given
    // -----
    // - A 3-dimensional θ₀, no offsets, then valid offsets.
    //
    // Expect
    // ------
    // - Both builds succeed.
    fn build_nelder_mead_accepts_default_and_explicit_steps() {
        // Arrange
        let theta0 = array![0.0, -1.0, 2.0];
        let opts = opts(SolverKind::NelderMead, LineSearcher::MoreThuente, None);

        // Act
        let default_steps = build_nelder_mead(&theta0, None, &opts);
        let explicit = build_nelder_mead(&theta0, Some(&array![0.01, 0.5, 0.5]), &opts);

        // Assert
        assert!(default_steps.is_ok());
        assert!(explicit.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Bad offsets are rejected before Argmin sees them.
    //
    // Given
    // -----
    // - Offsets with the wrong length, then with a negative entry.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`, then `InvalidSimplexStep`.
    fn build_nelder_mead_rejects_bad_steps() {
        let theta0 = array![0.0, 1.0];
        let opts = opts(SolverKind::NelderMead, LineSearcher::MoreThuente, None);

        assert!(matches!(
            build_nelder_mead(&theta0, Some(&array![0.1]), &opts),
            Err(OptError::ThetaLengthMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            build_nelder_mead(&theta0, Some(&array![0.1, -0.1]), &opts),
            Err(OptError::InvalidSimplexStep { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Both L-BFGS builders succeed with default and explicit memory.
    //
    // Given
    // -----
    // - Valid tolerances with `lbfgs_mem` `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - All four builds return `Ok(_)`.
    fn build_lbfgs_variants_with_default_and_explicit_memory() {
        for mem in [None, Some(11)] {
            let hz = opts(SolverKind::Lbfgs, LineSearcher::HagerZhang, mem);
            let mt = opts(SolverKind::Lbfgs, LineSearcher::MoreThuente, mem);
            assert!(build_optimizer_hager_zhang(&hz).is_ok());
            assert!(build_optimizer_more_thuente(&mt).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` works with and without tolerances.
    //
    // Given
    // -----
    // - A raw L-BFGS solver and options with both tolerances, then none.
    //
    // Expect
    // ------
    // - Both configurations succeed.
    fn configure_lbfgs_handles_present_and_absent_tolerances() {
        let with_tols = opts(SolverKind::Lbfgs, LineSearcher::HagerZhang, None);
        let raw = LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM);
        assert!(configure_lbfgs(raw, &with_tols).is_ok());

        let bare_tols = Tolerances::new(None, None, Some(50)).unwrap();
        let bare =
            MLEOptions::new(bare_tols, SolverKind::Lbfgs, LineSearcher::MoreThuente, None).unwrap();
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        assert!(configure_lbfgs(raw, &bare).is_ok());
    }
}
