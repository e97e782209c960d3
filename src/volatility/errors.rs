//! Errors for GARCH-family volatility models (data validation, configuration
//! checks, parameter domains, path generation, and optimizer failures).
//!
//! This module defines a model error type, [`GarchError`], and a parameter
//! error type, [`ParamError`], used across the engine and the internal Rust
//! core. Both implement `Display`/`Error` and, with the `python-bindings`
//! feature, convert to `PyErr`.
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Returns must be **finite**; a non-empty series with zero sample variance
//!   is degenerate.
//! - [`ParamError`] is raised by pure functions (transforms, moments); it is
//!   wrapped into [`GarchError::ParameterDomain`] at the model boundary.
//! - Optimizer/backend errors are normalized to [`GarchError::Optimization`]
//!   with a human-readable message.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

use crate::optimization::errors::OptError;

/// Crate-wide result alias for volatility operations that may produce
/// [`GarchError`].
pub type GarchResult<T> = Result<T, GarchError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for GARCH-family modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Input/data validation ----
    /// Series is empty.
    EmptySeries,

    /// A data point is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// Too few observations for the number of estimated parameters.
    InsufficientData { len: usize, required: usize },

    /// Sample variance of the returns is zero.
    DegenerateSeries,

    // ---- Parameters ----
    /// Constrained parameters or moments outside their domain.
    ParameterDomain(ParamError),

    // ---- Meta / options validation ----
    /// Variance guards must be finite with 0 < min < max.
    InvalidVarianceGuards { min: f64, max: f64, reason: &'static str },

    /// Init::Fixed(v) must be finite and > 0.
    InvalidInitFixed { value: f64 },

    /// Warm-start state must have a finite, positive variance and finite
    /// residual / mean.
    InvalidWarmStart { field: &'static str, value: f64 },

    /// Unknown model variant name.
    UnknownVariant { name: String },

    /// Unknown innovation distribution name.
    UnknownDistribution { name: String },

    /// Unknown engine name.
    UnknownEngine { name: String },

    // ---- Path generation ----
    /// Horizon must be at least one step.
    InvalidHorizon { horizon: usize },

    /// Fewer innovations than the horizon requires.
    InnovationsTooShort { len: usize, horizon: usize },

    /// An innovation is NaN/±inf.
    NonFiniteInnovation { index: usize, value: f64 },

    // ---- Estimation / optimizer ----
    /// The fit did not converge and the caller asked for a converged fit.
    ConvergenceFailed { status: String },

    /// Optimizer failed; include a human-readable message.
    Optimization { text: String },
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GarchError::EmptySeries => write!(f, "Return series is empty."),
            GarchError::NonFiniteData { index, value } => {
                write!(f, "Return at index {index} is not finite: {value}")
            }
            GarchError::InsufficientData { len, required } => {
                write!(f, "Insufficient data: {len} observations, at least {required} required")
            }
            GarchError::DegenerateSeries => {
                write!(f, "Return series has zero sample variance.")
            }

            // ---- Parameters ----
            GarchError::ParameterDomain(inner) => write!(f, "Parameter domain error: {inner}"),

            // ---- Meta / options validation ----
            GarchError::InvalidVarianceGuards { min, max, reason } => {
                write!(f, "Invalid variance guards (min: {min}, max: {max}): {reason}")
            }
            GarchError::InvalidInitFixed { value } => {
                write!(f, "Invalid fixed initial variance {value}: must be finite and > 0")
            }
            GarchError::InvalidWarmStart { field, value } => {
                write!(f, "Invalid warm-start {field}: {value}")
            }
            GarchError::UnknownVariant { name } => {
                write!(f, "Unknown model variant '{name}'")
            }
            GarchError::UnknownDistribution { name } => {
                write!(f, "Unknown innovation distribution '{name}'")
            }
            GarchError::UnknownEngine { name } => {
                write!(f, "Unknown engine '{name}'")
            }

            // ---- Path generation ----
            GarchError::InvalidHorizon { horizon } => {
                write!(f, "Invalid horizon {horizon}: must be at least 1")
            }
            GarchError::InnovationsTooShort { len, horizon } => {
                write!(f, "Innovations too short: {len} provided for horizon {horizon}")
            }
            GarchError::NonFiniteInnovation { index, value } => {
                write!(f, "Innovation at index {index} is not finite: {value}")
            }

            // ---- Estimation / optimizer ----
            GarchError::ConvergenceFailed { status } => {
                write!(f, "Estimation did not converge: {status}")
            }
            GarchError::Optimization { text } => write!(f, "Optimization failed: {text}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<GarchError> for PyErr {
    fn from(err: GarchError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ParamError> for GarchError {
    fn from(err: ParamError) -> GarchError {
        GarchError::ParameterDomain(err)
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> GarchError {
        GarchError::Optimization { text: err.to_string() }
    }
}

/// Errors raised by pure parameter transforms and moment computations.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Unconstrained vector has the wrong length for the variant.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    /// A constrained coefficient is NaN/±inf.
    NonFiniteParam { name: &'static str, value: f64 },

    /// Omega must be > 0 (additive variants).
    InvalidOmega { value: f64 },

    /// Alpha must lie in (0, 1) (additive variants).
    InvalidAlpha { value: f64 },

    /// Beta must lie in [0, 1).
    InvalidBeta { value: f64 },

    /// Additive variants must satisfy alpha + beta < 1.
    StationarityViolated { coeff_sum: f64 },

    /// Skewed-t degrees of freedom must exceed 2.
    InvalidShape { nu: f64 },

    /// Skewed-t skew must be finite and > 0.
    InvalidSkew { xi: f64 },

    /// E|z| is undefined for nu <= 2.
    AbsMomentUndefined { nu: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            ParamError::NonFiniteParam { name, value } => {
                write!(f, "Parameter {name} is not finite: {value}")
            }
            ParamError::InvalidOmega { value } => {
                write!(f, "Invalid omega parameter: {value}, must be finite and > 0")
            }
            ParamError::InvalidAlpha { value } => {
                write!(f, "Invalid alpha parameter: {value}, must lie in (0, 1)")
            }
            ParamError::InvalidBeta { value } => {
                write!(f, "Invalid beta parameter: {value}, must lie in [0, 1)")
            }
            ParamError::StationarityViolated { coeff_sum } => {
                write!(f, "Model not stationary: alpha + beta = {coeff_sum}, must be < 1")
            }
            ParamError::InvalidShape { nu } => {
                write!(f, "Invalid degrees of freedom {nu}: must be finite and > 2")
            }
            ParamError::InvalidSkew { xi } => {
                write!(f, "Invalid skew {xi}: must be finite and > 0")
            }
            ParamError::AbsMomentUndefined { nu } => {
                write!(f, "E|z| undefined for degrees of freedom {nu} <= 2")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
