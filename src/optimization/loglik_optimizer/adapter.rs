//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! Maximizing `ℓ(θ)` becomes minimizing the cost `c(θ) = -ℓ(θ)`. Analytic
//! gradients (if provided) are negated accordingly. Without one, the
//! **cost** closure is finite-differenced, so that branch needs no sign flip.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// Nelder–Mead only calls `cost`; L-BFGS calls both.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    /// Finite-difference gradient of the cost.
    ///
    /// Central differences first. If any cost evaluation failed or the result
    /// is not finite, retry once with forward differences.
    fn fd_gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        let dim = theta.len();
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let cost_func = |theta: &Theta| -> f64 {
            match self.cost(theta) {
                Ok(val) => val,
                Err(e) => {
                    let mut slot = closure_err.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(e);
                    }
                    f64::NAN
                }
            }
        };

        let central = theta.central_diff(&cost_func);
        if closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
            return Ok(central);
        }
        forward_fd(theta, &cost_func, &closure_err)
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `c(θ) = -ℓ(θ)`.
    ///
    /// # Errors
    /// - Any `OptError` raised by the model's `value`.
    /// - `OptError::NonFiniteCost` if `ℓ(θ)` is not finite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Gradient of the cost at `θ`: `-∇ℓ(θ)` when the model supplies one,
    /// otherwise a finite-difference estimate.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => self.fd_gradient(theta),
            Err(e) => Err(e.into()),
        }
    }
}

/// Forward-difference gradient of `func` with error capture.
///
/// Clears `closure_err`, differentiates, then returns the first captured
/// error (if any) or the validated gradient.
fn forward_fd<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Sign conventions of the adapter and its finite-difference fallback.
    // -------------------------------------------------------------------------

    struct Quadratic;

    impl LogLikelihood for Quadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            Ok(-(theta[0] - 1.0).powi(2) - 2.0 * (theta[1] + 0.5).powi(2))
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Cost is the negated log-likelihood and the FD gradient is the cost
    // gradient.
    //
    // Given
    // -----
    // - A concave quadratic with maximum at (1, -0.5), evaluated at (0, 0).
    //
    // Expect
    // ------
    // - cost = 1.5; gradient ≈ (-2, 2).
    fn adapter_negates_value_and_differentiates_cost() {
        // Arrange
        let adapter = ArgMinAdapter::new(&Quadratic, &());
        let theta = array![0.0, 0.0];

        // Act
        let cost = adapter.cost(&theta).unwrap();
        let grad = adapter.gradient(&theta).unwrap();

        // Assert
        assert_relative_eq!(cost, 1.5, epsilon = 1e-12);
        assert_relative_eq!(grad[0], -2.0, epsilon = 1e-5);
        assert_relative_eq!(grad[1], 2.0, epsilon = 1e-5);
    }
}
