use crate::WorkingFloat;

/// f(x) = x^2
pub fn evaluate<T: WorkingFloat>(x: T) -> T {
    x * x
}

/// f'(x) = 2x, the closed form used as ground truth.
pub fn true_derivative<T: WorkingFloat>(x: T) -> T {
    (T::one() + T::one()) * x
}
