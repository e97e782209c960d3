//! Variance guards — the positivity floor and overflow cap of the recursion.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the bounds applied to every
//! conditional variance (or, for the Threshold variant, every conditional
//! standard deviation) produced by the recursion, the forecaster, and the
//! path simulator.
//!
//! Key behaviors
//! -------------
//! - [`VarianceGuards::new`] rejects non-finite, non-positive, or inverted
//!   bounds with `GarchError::InvalidVarianceGuards`.
//! - [`VarianceGuards::clamp`] bounds a variance to `[min, max]`; NaN maps to
//!   `min` so a failed evaluation never propagates.
//! - [`VarianceGuards::clamp_sd`] bounds a standard deviation to
//!   `[min, √max]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < min < max`, both finite.
//! - The floor is a numerical device, not a model choice; both backends must
//!   apply the same guards for their paths to agree.
//!
//! Conventions
//! -----------
//! - Defaults are [`VARIANCE_FLOOR`] and [`VARIANCE_CAP`].
//! - The Threshold variant floors σ (not σ²) at `min`, matching its
//!   volatility-scale recursion.
use crate::volatility::errors::{GarchError, GarchResult};

/// Smallest conditional variance (or Threshold volatility) ever emitted.
pub const VARIANCE_FLOOR: f64 = 1e-12;

/// Largest conditional variance ever emitted; guards `exp` overflow.
pub const VARIANCE_CAP: f64 = 1e12;

/// VarianceGuards — validated `[min, max]` bounds for conditional variances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceGuards {
    /// Lower bound (strictly > 0).
    pub min: f64,
    /// Upper bound (strictly > `min`).
    pub max: f64,
}

impl VarianceGuards {
    /// Construct validated guards from a `(min, max)` tuple.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidVarianceGuards` when `min >= max`, either bound is
    ///   not finite, or `min <= 0`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_garch::volatility::core::guards::VarianceGuards;
    /// let guards = VarianceGuards::new((1e-10, 1e6)).unwrap();
    /// assert_eq!(guards.clamp(0.0), 1e-10);
    /// assert!(VarianceGuards::new((1.0, 1.0)).is_err());
    /// ```
    pub fn new(value: (f64, f64)) -> GarchResult<Self> {
        let (min, max) = value;
        if !min.is_finite() || !max.is_finite() {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Variance guards must be finite.",
            });
        }
        if min >= max {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Variance guards must have min < max.",
            });
        }
        if min <= 0.0 {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Variance guards must be strictly positive.",
            });
        }
        Ok(VarianceGuards { min, max })
    }

    /// Bound a variance to `[min, max]`; NaN maps to `min`.
    #[inline]
    pub fn clamp(&self, sigma2: f64) -> f64 {
        if sigma2.is_nan() { self.min } else { sigma2.clamp(self.min, self.max) }
    }

    /// Bound a standard deviation to `[min, √max]`; NaN maps to `min`.
    #[inline]
    pub fn clamp_sd(&self, sigma: f64) -> f64 {
        if sigma.is_nan() { self.min } else { sigma.clamp(self.min, self.max.sqrt()) }
    }
}

impl Default for VarianceGuards {
    fn default() -> Self {
        VarianceGuards { min: VARIANCE_FLOOR, max: VARIANCE_CAP }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Construction-time validation and clamping behavior of `VarianceGuards`.
    // Their effect inside full recursions is covered in `recursion`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Invalid bounds are rejected with the matching reason.
    //
    // Given
    // -----
    // - Inverted, non-finite, and non-positive pairs.
    //
    // Expect
    // ------
    // - `InvalidVarianceGuards` whose reason names the violated rule.
    fn new_rejects_invalid_bounds() {
        let reason = |pair| match VarianceGuards::new(pair) {
            Err(GarchError::InvalidVarianceGuards { reason, .. }) => reason,
            other => panic!("expected InvalidVarianceGuards, got {other:?}"),
        };
        assert!(reason((1.0, 0.5)).contains("min < max"));
        assert!(reason((1e-12, f64::INFINITY)).contains("finite"));
        assert!(reason((-1.0, 1.0)).contains("positive"));
    }

    #[test]
    // Purpose
    // -------
    // Clamping bounds both tails and absorbs NaN.
    //
    // Given
    // -----
    // - Default guards; inputs below, inside, above the range, and NaN.
    //
    // Expect
    // ------
    // - Floor, identity, cap, floor; the sd cap is √max.
    fn clamp_bounds_variance_and_sd() {
        let g = VarianceGuards::default();
        assert_eq!(g.clamp(-3.0), VARIANCE_FLOOR);
        assert_eq!(g.clamp(0.5), 0.5);
        assert_eq!(g.clamp(f64::INFINITY), VARIANCE_CAP);
        assert_eq!(g.clamp(f64::NAN), VARIANCE_FLOOR);
        assert_eq!(g.clamp_sd(1e9), 1e6);
        assert_eq!(g.clamp_sd(0.0), VARIANCE_FLOOR);
    }
}
