//! GARCH options — estimation-time configuration.
//!
//! [`GarchOptions`] bundles the initial-variance policy, the variance guards,
//! the optimizer options, and whether an estimated skewed-t law also
//! estimates its shape and skew. Each component validates itself through its
//! own constructor; this type adds no cross-field checks.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    volatility::core::{guards::VarianceGuards, init::Init},
};

/// GarchOptions — configuration shared by both backends for one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    /// Initial-variance policy for fresh filters.
    pub init: Init,
    /// Floor and cap applied to every conditional variance.
    pub guards: VarianceGuards,
    /// Optimizer configuration (solver, tolerances, iteration cap, timeout).
    pub mle_opts: MLEOptions,
    /// Estimate `(ν, ξ)` when the law is skewed-t; otherwise they stay at the
    /// values the law was constructed with.
    pub estimate_shape: bool,
}

impl GarchOptions {
    pub fn new(
        init: Init, guards: VarianceGuards, mle_opts: MLEOptions, estimate_shape: bool,
    ) -> GarchOptions {
        GarchOptions { init, guards, mle_opts, estimate_shape }
    }

    pub fn with_mle_opts(mut self, mle_opts: MLEOptions) -> Self {
        self.mle_opts = mle_opts;
        self
    }

    pub fn with_guards(mut self, guards: VarianceGuards) -> Self {
        self.guards = guards;
        self
    }

    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    pub fn with_estimate_shape(mut self, estimate_shape: bool) -> Self {
        self.estimate_shape = estimate_shape;
        self
    }
}

impl Default for GarchOptions {
    fn default() -> Self {
        GarchOptions {
            init: Init::default(),
            guards: VarianceGuards::default(),
            mle_opts: MLEOptions::default(),
            estimate_shape: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::guards::VARIANCE_FLOOR;

    #[test]
    // Purpose
    // -------
    // Defaults and builder methods set fields as documented.
    //
    // Given
    // -----
    // - `GarchOptions::default()` then `with_init(Fixed)` and
    //   `with_estimate_shape(false)`.
    //
    // Expect
    // ------
    // - Sample-variance init, default floor, shape estimated; then the
    //   overrides are applied and other fields kept.
    fn defaults_and_builders() {
        let opts = GarchOptions::default();
        assert_eq!(opts.init, Init::SampleVariance);
        assert_eq!(opts.guards.min, VARIANCE_FLOOR);
        assert!(opts.estimate_shape);

        let fixed = Init::fixed(1e-4).unwrap();
        let tuned = opts.clone().with_init(fixed).with_estimate_shape(false);
        assert_eq!(tuned.init, fixed);
        assert!(!tuned.estimate_shape);
        assert_eq!(tuned.mle_opts, opts.mle_opts);
    }
}
