//! Validation helpers for log-likelihood optimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Option checks**: [`verify_tol_grad`], [`verify_tol_cost`],
//!   [`verify_simplex_step`], [`verify_timeout`].
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Simplex steps**: [`validate_steps`] checks per-coordinate offsets.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks log-likelihood outputs
//!   for finiteness.
use std::time::Duration;

use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta},
};

/// Validate the optional gradient-norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a fallback simplex offset.
///
/// # Errors
/// Returns [`OptError::InvalidSimplexStep`] unless `step` is finite and > 0.
pub fn verify_simplex_step(step: f64) -> OptResult<()> {
    if !step.is_finite() {
        return Err(OptError::InvalidSimplexStep { step, reason: "Step must be finite." });
    }
    if step <= 0.0 {
        return Err(OptError::InvalidSimplexStep { step, reason: "Step must be positive." });
    }
    Ok(())
}

/// Validate a wall-clock budget.
///
/// # Errors
/// Returns [`OptError::InvalidTimeout`] for a zero duration.
pub fn verify_timeout(timeout: Duration) -> OptResult<()> {
    if timeout.is_zero() {
        return Err(OptError::InvalidTimeout {
            millis: timeout.as_millis(),
            reason: "Timeout must be non-zero.",
        });
    }
    Ok(())
}

/// Validate model-supplied simplex offsets against `dim`.
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] if `steps.len() != dim`.
/// - [`OptError::InvalidSimplexStep`] for the first non-positive or
///   non-finite entry.
pub fn validate_steps(steps: &Theta, dim: usize) -> OptResult<()> {
    if steps.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: steps.len() });
    }
    for &step in steps.iter() {
        verify_simplex_step(step)?;
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar log-likelihood value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}
