//! Numerical stability utilities for parameter transforms.
//!
//! Provides guarded scalar maps between the unconstrained optimizer space and
//! the bounded domains used by GARCH-family parameters. Each map is written so
//! that any finite input produces a finite, in-range output in `f64`:
//!
//! - [`safe_logistic`]: ℝ → (0, 1), saturating `LOGIT_EPS` away from the ends.
//! - [`safe_logit`]: inverse of the logistic on (0, 1), clamping its input to
//!   `[LOGIT_EPS, 1 − LOGIT_EPS]` first.
//! - [`safe_exp`]: ℝ → (0, ∞) with the exponent clipped to `±EXP_CLIP`.
//! - [`safe_ln`]: inverse of [`safe_exp`] on `(0, ∞)`, flooring its input at
//!   `f64::MIN_POSITIVE`.
//!
//! # Provided constants
//! - [`PERSISTENCE_MARGIN`]: the `ε` in `β = (1 − ε)(1 − α)·logistic(θ_β)`,
//!   which keeps `α + β < 1` strictly.
//! - [`LOGIT_EPS`]: saturation distance of the logistic from 0 and 1.
//! - [`EXP_CLIP`]: largest exponent magnitude passed to `exp`.

/// Margin that keeps additive GARCH variants strictly inside `α + β < 1`.
pub const PERSISTENCE_MARGIN: f64 = 1e-4;

/// Logistic outputs never come closer than this to 0 or 1.
pub const LOGIT_EPS: f64 = 1e-12;

/// Exponents are clipped to `[-EXP_CLIP, EXP_CLIP]` before `exp`.
pub const EXP_CLIP: f64 = 700.0;

/// Numerically stable logistic `σ(x) = 1 / (1 + e^{−x})`.
///
/// Uses the branch `e^{x} / (1 + e^{x})` for negative `x` so neither branch
/// overflows, then saturates the result into `[LOGIT_EPS, 1 − LOGIT_EPS]`.
/// The saturation only bites for `|x| ≳ 27.6`, where the exact value is no
/// longer representable as distinct from 0 or 1 anyway.
///
/// # Parameters
/// - `x`: any finite real.
///
/// # Returns
/// - `σ(x)` in the open interval `(0, 1)`.
pub fn safe_logistic(x: f64) -> f64 {
    let raw = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    };
    raw.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS)
}

/// Inverse logistic `logit(p) = ln(p / (1 − p))`.
///
/// The argument is clamped to `[LOGIT_EPS, 1 − LOGIT_EPS]` so boundary values
/// map to large but finite reals.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

/// `exp(x)` with the exponent clipped to `±EXP_CLIP`.
pub fn safe_exp(x: f64) -> f64 {
    x.clamp(-EXP_CLIP, EXP_CLIP).exp()
}

/// `ln(x)` with the argument floored at `f64::MIN_POSITIVE`.
pub fn safe_ln(x: f64) -> f64 {
    x.max(f64::MIN_POSITIVE).ln()
}
