//! core — shared GARCH-family data, parameters, recursions, and laws.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks of the manual backend: return data,
//! model variants, the Parameter Transform, innovation laws, the variance
//! recursion with its guards and initial-state policies, the likelihood,
//! the one-step forecaster, and the path simulator. Estimation
//! (`volatility::models`) and the engine adapter build on these primitives.
//!
//! Key behaviors
//! -------------
//! - [`ReturnSeries`] validates inputs; [`ModelVariant`] fixes layout and
//!   recursion; [`GarchParams`] and [`ParamLayout`] implement the transform.
//! - [`Innovation`] provides log-density, CDF, quantile, sampling and `E|z|`,
//!   with skewed-t failures recovered through Normal fallbacks.
//! - [`compute_variance`] filters a series; [`next_variance`] is the one-step
//!   kernel shared by filter, forecast and simulation.
//! - [`log_likelihood`] and [`InfoCriteria`] score a filtered series.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every [`GarchParams`] satisfies its variant's domain; the transform never
//!   produces an invalid set for a finite θ.
//! - Every variance leaving this module is finite and strictly positive.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `sigma2[t]` is the conditional variance of `r_t`
//!   given information through `t − 1`.
//! - This module does not log except for distribution fallbacks; it reports
//!   errors through `GarchResult` / `ParamResult`.
//!
//! Downstream usage
//! ----------------
//! - Depend on the re-exports below or the [`prelude`] rather than reaching
//!   into submodules directly.
pub mod data;
pub mod forecasts;
pub mod guards;
pub mod init;
pub mod innovations;
pub mod likelihood;
pub mod options;
pub mod params;
pub mod recursion;
pub mod simulation;
pub mod skew_t;
pub mod variant;

pub use self::data::{MIN_OBSERVATIONS, ReturnSeries, min_observations};
pub use self::forecasts::{VarianceForecast, forecast_one_step};
pub use self::guards::{VARIANCE_CAP, VARIANCE_FLOOR, VarianceGuards};
pub use self::init::{Init, WarmStart};
pub use self::innovations::{Innovation, student_t_abs_moment};
pub use self::likelihood::{INFEASIBLE_LOGLIK, InfoCriteria, log_likelihood};
pub use self::options::GarchOptions;
pub use self::params::{GarchParams, ParamLayout};
pub use self::recursion::{Start, VarianceSequence, compute_variance, next_variance};
pub use self::simulation::{PathStep, SimulatedPath, draw_innovations, simulate_path};
pub use self::skew_t::{
    DistributionFallback, dsstd_robust, psstd_robust, qsstd_robust, rsstd_robust,
};
pub use self::variant::ModelVariant;

pub mod prelude {
    pub use super::{
        GarchOptions, GarchParams, Init, Innovation, ModelVariant, ReturnSeries, SimulatedPath,
        VarianceGuards, VarianceSequence, WarmStart,
    };
}
