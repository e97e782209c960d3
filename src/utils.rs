//! Python-boundary helpers: array extraction and option building.
//!
//! Everything here is compiled only with the `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use std::{str::FromStr, time::Duration};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, SolverKind, Tolerances},
    volatility::{
        core::{
            data::ReturnSeries, guards::VarianceGuards, init::Init, options::GarchOptions,
        },
        errors::GarchError,
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a Python array-like into an owned `Vec<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(slice.to_vec())
}

#[cfg(feature = "python-bindings")]
pub fn extract_returns<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<ReturnSeries> {
    let data = extract_f64_vec(py, raw, "returns")?;
    Ok(ReturnSeries::from_slice(&data)?)
}

#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_garch_options(
    init_fixed: Option<f64>, variance_guards: Option<(f64, f64)>, solver: Option<&str>,
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, timeout_secs: Option<f64>, estimate_shape: bool,
) -> PyResult<GarchOptions> {
    let init = match init_fixed {
        Some(v) => Init::fixed(v)?,
        None => Init::SampleVariance,
    };
    let guards = match variance_guards {
        Some(bounds) => VarianceGuards::new(bounds)?,
        None => VarianceGuards::default(),
    };
    let mle_opts = extract_mle_opts(solver, tol_grad, tol_cost, max_iter, line_searcher, timeout_secs)?;
    Ok(GarchOptions::new(init, guards, mle_opts, estimate_shape))
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    solver: Option<&str>, tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, timeout_secs: Option<f64>,
) -> PyResult<MLEOptions> {
    let defaults = MLEOptions::default();

    // OptResult<_> -> GarchError -> PyErr
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        defaults.tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter).map_err(GarchError::from)?
    };
    let solver = match solver {
        Some(name) => SolverKind::from_str(name).map_err(GarchError::from)?,
        None => defaults.solver,
    };
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(GarchError::from)?,
        None => defaults.line_searcher,
    };
    let mut opts = MLEOptions::new(tols, solver, ls, None).map_err(GarchError::from)?;
    if let Some(secs) = timeout_secs {
        let timeout = Duration::try_from_secs_f64(secs)
            .map_err(|_| PyValueError::new_err("timeout must be a finite, non-negative number"))?;
        opts = opts.with_timeout(timeout).map_err(GarchError::from)?;
    }
    Ok(opts)
}
