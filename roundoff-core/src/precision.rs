use core::fmt::{Debug, Display, LowerExp};

use num_traits::Float;

/// Floating point type the whole sweep is carried out in.
pub trait WorkingFloat: Float + Into<f64> + Debug + Display + LowerExp + 'static {
    const NAME: &'static str;
}

impl WorkingFloat for f32 {
    const NAME: &'static str = "single";
}

impl WorkingFloat for f64 {
    const NAME: &'static str = "double";
}

/// Epsilon of the x87 80 bit extended format (64 bit mantissa), 2^-63.
/// There is no such type in Rust so it can only be reported, not swept.
pub const EXTENDED_EPSILON: f64 = 1.0842021724855044e-19;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineEpsilons {
    pub single: f32,
    pub double: f64,
    pub extended: f64,
}

impl MachineEpsilons {
    pub const fn new() -> Self {
        Self {
            single: f32::EPSILON,
            double: f64::EPSILON,
            extended: EXTENDED_EPSILON,
        }
    }
}

impl Default for MachineEpsilons {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds epsilon by halving until `1 + e / 2` rounds back to 1.
pub fn measure_epsilon<T: WorkingFloat>() -> T {
    let two = T::one() + T::one();
    let mut epsilon = T::one();
    while T::one() + epsilon / two != T::one() {
        epsilon = epsilon / two;
    }
    log_debug!("measured {} precision epsilon: {:e}", T::NAME, epsilon);
    epsilon
}
