// only use std when feature = "std" is enabled or during testing
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod fmt;

mod estimator;
mod function;
mod precision;
mod series;
mod sweep;

pub use estimator::{Estimate, EstimateError, estimate};
pub use function::{evaluate, true_derivative};
pub use precision::{EXTENDED_EPSILON, MachineEpsilons, WorkingFloat, measure_epsilon};
pub use series::{ErrorSample, ResultSeries, ResultSink};
pub use sweep::{MAX_STEPS, Sweep, SweepConfig, SweepError};

#[cfg(test)]
mod tests;
