//! numerical_stability — guarded scalar transforms for parameter mappings.
//!
//! Purpose
//! -------
//! Collect the small numerical primitives used to map unconstrained optimizer
//! vectors into bounded GARCH parameter domains (and back), together with the
//! tolerances those maps share.
//!
//! Key behaviors
//! -------------
//! - Provide overflow-safe logistic / logit and exp / ln pairs.
//! - Centralize the persistence margin `ε` used to keep `α + β < 1`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every function is total on finite inputs and returns finite outputs.
//! - The logistic saturates `LOGIT_EPS` away from 0 and 1; callers that need
//!   exact invertibility stay inside `|x| < 27`.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64`; no allocation, logging, or global state.
//!
//! Downstream usage
//! ----------------
//! - `volatility::core::params` builds the Parameter Transform from these
//!   maps.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] check agreement with naive formulas on
//!   safe grids, tail saturation, and inverse pairs.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EXP_CLIP, LOGIT_EPS, PERSISTENCE_MARGIN, safe_exp, safe_ln, safe_logistic, safe_logit,
};

pub mod prelude {
    pub use super::transformations::{
        PERSISTENCE_MARGIN, safe_exp, safe_ln, safe_logistic, safe_logit,
    };
}
