//! engine — the dual-backend adapter.
//!
//! [`Engine`] dispatches fit, path, forecast, convergence and information
//! criteria to a [`VolatilityBackend`] chosen by [`EngineKind`]. Both
//! backends return the same [`FitResult`] type, so handles move freely
//! between engines.
//!
//! [`FitResult`]: crate::volatility::models::FitResult
pub mod adapter;
pub mod backend;

pub use self::adapter::{Engine, EngineConfig, FitHandle};
pub use self::backend::{EngineKind, ManualBackend, ReferenceBackend, VolatilityBackend};

pub mod prelude {
    pub use super::{Engine, EngineConfig, EngineKind, FitHandle, VolatilityBackend};
}
