//! Batch sweep — many independent fits with skip-and-continue semantics.
//!
//! Each [`FitJob`] owns its series, so jobs run in parallel on the rayon
//! pool with no shared mutation. A failing or non-converging job never
//! aborts the sweep: it is reported in its [`BatchOutcome`] and logged with
//! its label. Outcomes come back in job order.
use rayon::prelude::*;

use crate::volatility::{
    core::{data::ReturnSeries, innovations::Innovation, variant::ModelVariant},
    engine::{Engine, FitHandle},
    errors::GarchError,
};

/// One unit of work (e.g. asset × variant × window).
#[derive(Debug, Clone, PartialEq)]
pub struct FitJob {
    pub label: String,
    pub variant: ModelVariant,
    pub law: Innovation,
    pub returns: ReturnSeries,
}

impl FitJob {
    pub fn new(
        label: impl Into<String>, variant: ModelVariant, law: Innovation, returns: ReturnSeries,
    ) -> Self {
        FitJob { label: label.into(), variant, law, returns }
    }
}

/// Result of one job.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Fitted { label: String, handle: FitHandle },
    /// The optimizer stopped without converging (iteration cap or timeout);
    /// the result is kept for callers that accept it.
    NotConverged { label: String, handle: FitHandle },
    Failed { label: String, error: GarchError },
}

impl BatchOutcome {
    pub fn label(&self) -> &str {
        match self {
            BatchOutcome::Fitted { label, .. }
            | BatchOutcome::NotConverged { label, .. }
            | BatchOutcome::Failed { label, .. } => label,
        }
    }

    /// The handle of a converged fit.
    pub fn fitted(&self) -> Option<&FitHandle> {
        match self {
            BatchOutcome::Fitted { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// Whether the job ended without a converged fit.
    pub fn is_failure(&self) -> bool {
        !matches!(self, BatchOutcome::Fitted { .. })
    }
}

/// Fit every job on `engine` in parallel.
pub fn fit_batch(engine: &Engine, jobs: Vec<FitJob>) -> Vec<BatchOutcome> {
    jobs.into_par_iter().map(|job| run_job(engine, job)).collect()
}

fn run_job(engine: &Engine, job: FitJob) -> BatchOutcome {
    let FitJob { label, variant, law, returns } = job;
    match engine.fit(variant, law, &returns) {
        Ok(handle) if handle.converged() => BatchOutcome::Fitted { label, handle },
        Ok(handle) => {
            tracing::warn!(
                job = %label,
                engine = %handle.engine,
                status = %handle.result.status,
                "batch job did not converge"
            );
            BatchOutcome::NotConverged { label, handle }
        }
        Err(error) => {
            tracing::warn!(job = %label, engine = %engine.kind, error = %error, "batch job failed");
            BatchOutcome::Failed { label, error }
        }
    }
}
