//! reference — independent constrained-space GARCH backend.
//!
//! Purpose
//! -------
//! Provide a second implementation of fit, forecast and path simulation that
//! shares no recursion, likelihood or optimizer-wiring code with the manual
//! backend. It exists so the manual engine can be checked for parity against
//! something other than itself.
//!
//! Key behaviors
//! -------------
//! - [`ReferenceEstimator`] runs argmin's Nelder–Mead directly over scaled
//!   constrained coefficients with an out-of-domain penalty.
//! - [`filter`] holds the slice-based recursion and likelihood; [`path`]
//!   continues a [`FitResult`] from its final state.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shared with the manual backend: variance guards, the innovation laws,
//!   the public numerical constants, and the [`FitResult`] shape.
//! - Any [`FitResult`] can be simulated here, whichever backend produced it.
//!
//! [`FitResult`]: crate::volatility::models::FitResult
pub mod estimator;
pub mod filter;
pub mod path;

pub use self::estimator::ReferenceEstimator;
pub use self::filter::{Coefficients, Filtered};
