use core::fmt;

use crate::{WorkingFloat, evaluate, true_derivative};

/// Forward difference estimate of f'(x) together with every intermediate value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate<T: WorkingFloat> {
    pub x: T,
    pub step: T,
    /// x + h
    pub shifted: T,
    /// f(x + h)
    pub f_shifted: T,
    /// f(x)
    pub f_x: T,
    /// f(x + h) - f(x)
    pub difference: T,
    pub estimated: T,
    pub true_derivative: T,
    pub absolute_error: T,
    pub relative_error: T,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimateError {
    /// h is exactly zero
    ZeroStep,
    /// f'(x) is exactly zero so the relative error is undefined
    ZeroDerivative,
    /// f(x), f(x + h) or the estimate overflowed
    NonFinite,
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateError::ZeroStep => write!(f, "step size is zero"),
            EstimateError::ZeroDerivative => {
                write!(f, "true derivative is zero, relative error is undefined")
            }
            EstimateError::NonFinite => write!(f, "function value or estimate is not finite"),
        }
    }
}

impl core::error::Error for EstimateError {}

/// Estimates f'(x) with (f(x + h) - f(x)) / h and compares it against 2x.
pub fn estimate<T: WorkingFloat>(x: T, h: T) -> Result<Estimate<T>, EstimateError> {
    if h.is_zero() {
        return Err(EstimateError::ZeroStep);
    }
    let actual = true_derivative(x);
    if actual.is_zero() {
        return Err(EstimateError::ZeroDerivative);
    }

    let shifted = x + h;
    let f_shifted = evaluate(shifted);
    let f_x = evaluate(x);
    let difference = f_shifted - f_x;
    let estimated = difference / h;
    if !(f_x.is_finite() && f_shifted.is_finite() && estimated.is_finite()) {
        return Err(EstimateError::NonFinite);
    }
    let signed_error = estimated - actual;

    let estimate = Estimate {
        x,
        step: h,
        shifted,
        f_shifted,
        f_x,
        difference,
        estimated,
        true_derivative: actual,
        absolute_error: signed_error.abs(),
        relative_error: signed_error / actual,
    };

    log_trace!(
        "h={:e} x+h={:e} f(x+h)={:e} f(x)={:e} diff={:e} est={:e} true={:e} rel={:e}",
        estimate.step,
        estimate.shifted,
        estimate.f_shifted,
        estimate.f_x,
        estimate.difference,
        estimate.estimated,
        estimate.true_derivative,
        estimate.relative_error,
    );

    Ok(estimate)
}
