//! Return series container with validation and sample-size checks.
use crate::volatility::errors::{GarchError, GarchResult};
use ndarray::Array1;

/// Smallest series any fit accepts, regardless of parameter count.
pub const MIN_OBSERVATIONS: usize = 30;

/// Observations required per estimated parameter.
pub const OBS_PER_PARAM: usize = 10;

/// ReturnSeries — validated, ordered return observations for one asset.
///
/// Returns are read-only once constructed. The only invariants enforced are
/// non-emptiness and finiteness; sample-size and degeneracy checks depend on
/// the model and are applied by [`ReturnSeries::require_fit_sample`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    /// Observed returns (finite).
    pub data: Array1<f64>,
}

impl ReturnSeries {
    /// Construct a validated [`ReturnSeries`] from raw returns.
    ///
    /// Errors
    /// ------
    /// - `GarchError::EmptySeries` when `data.len() == 0`.
    /// - `GarchError::NonFiniteData { index, value }` for the first NaN or ±∞.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_garch::volatility::core::data::ReturnSeries;
    /// let series = ReturnSeries::new(array![0.01, -0.02, 0.005]).unwrap();
    /// assert_eq!(series.len(), 3);
    /// ```
    pub fn new(data: Array1<f64>) -> GarchResult<Self> {
        if data.is_empty() {
            return Err(GarchError::EmptySeries);
        }
        for (index, &value) in data.iter().enumerate() {
            if !value.is_finite() {
                return Err(GarchError::NonFiniteData { index, value });
            }
        }
        Ok(ReturnSeries { data })
    }

    pub fn from_slice(data: &[f64]) -> GarchResult<Self> {
        Self::new(Array1::from(data.to_vec()))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn mean(&self) -> f64 {
        self.data.sum() / self.len() as f64
    }

    /// Population variance around the sample mean.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.data.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / self.len() as f64
    }

    /// Check the series can support a fit with `k` estimated parameters.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InsufficientData` when `len < max(30, 10·k)`.
    /// - `GarchError::DegenerateSeries` when every return is identical (zero
    ///   sample variance).
    pub fn require_fit_sample(&self, k: usize) -> GarchResult<()> {
        let required = min_observations(k);
        if self.len() < required {
            return Err(GarchError::InsufficientData { len: self.len(), required });
        }
        let first = self.data[0];
        if self.data.iter().all(|&r| r == first) {
            return Err(GarchError::DegenerateSeries);
        }
        Ok(())
    }
}

/// Minimum sample size for `k` estimated parameters: `max(30, 10·k)`.
pub fn min_observations(k: usize) -> usize {
    MIN_OBSERVATIONS.max(OBS_PER_PARAM * k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Construction-time validation and sample-size rules of `ReturnSeries`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Empty and non-finite inputs are rejected at construction.
    //
    // Given
    // -----
    // - An empty array and one with NaN at index 2.
    //
    // Expect
    // ------
    // - `EmptySeries` and `NonFiniteData { index: 2, .. }`.
    fn new_rejects_empty_and_non_finite() {
        assert_eq!(ReturnSeries::new(Array1::zeros(0)), Err(GarchError::EmptySeries));
        assert!(matches!(
            ReturnSeries::new(array![0.1, 0.2, f64::NAN]),
            Err(GarchError::NonFiniteData { index: 2, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Moments are computed around the sample mean.
    //
    // Given
    // -----
    // - Returns [1, 2, 3, 4].
    //
    // Expect
    // ------
    // - mean = 2.5, population variance = 1.25.
    fn mean_and_variance_match_hand_computation() {
        let s = ReturnSeries::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(s.mean(), 2.5);
        assert_relative_eq!(s.variance(), 1.25);
    }

    #[test]
    // Purpose
    // -------
    // Short and constant series cannot be fitted.
    //
    // Given
    // -----
    // - 40 points for k = 5 (needs 50); 60 constant points for k = 4.
    //
    // Expect
    // ------
    // - `InsufficientData { len: 40, required: 50 }`, then `DegenerateSeries`.
    fn require_fit_sample_rejects_short_and_degenerate() {
        let short = ReturnSeries::new(Array1::linspace(-0.02, 0.02, 40)).unwrap();
        assert_eq!(
            short.require_fit_sample(5),
            Err(GarchError::InsufficientData { len: 40, required: 50 })
        );

        let flat = ReturnSeries::new(Array1::from_elem(60, 0.01)).unwrap();
        assert_eq!(flat.require_fit_sample(4), Err(GarchError::DegenerateSeries));
        assert_eq!(min_observations(2), MIN_OBSERVATIONS);
    }
}
