use core::fmt;

use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use crate::{ErrorSample, EstimateError, ResultSeries, WorkingFloat, estimate};

/// Capacity of a [`ResultSeries`].
pub const MAX_STEPS: usize = 128;

/// Parameters of the geometric step sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// evaluation point
    pub x: f64,
    /// h of the first step
    pub initial_step: f64,
    /// h is divided by this after every step
    pub divisor: f64,
    pub steps: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            x: 1.0 / 3.0,
            initial_step: 1.0,
            divisor: 2.0,
            steps: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    InvalidConfig(&'static str),
    /// h divided down to exactly zero before step `index`
    StepUnderflow { index: usize },
    /// more steps than a [`ResultSeries`] holds
    SeriesFull { index: usize },
    Estimate { index: usize, error: EstimateError },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::InvalidConfig(reason) => write!(f, "invalid sweep config: {}", reason),
            SweepError::StepUnderflow { index } => {
                write!(f, "step size underflowed to zero at step {}", index)
            }
            SweepError::SeriesFull { index } => {
                write!(f, "result series is full at step {}", index)
            }
            SweepError::Estimate { index, error } => write!(f, "step {}: {}", index, error),
        }
    }
}

impl core::error::Error for SweepError {}

/// Forward difference sweep carried out in precision `T`.
#[derive(Debug, Clone, Copy)]
pub struct Sweep<T: WorkingFloat> {
    x: T,
    initial_step: T,
    divisor: T,
    steps: usize,
}

impl<T: WorkingFloat> Sweep<T> {
    pub fn new(config: &SweepConfig) -> Result<Self, SweepError> {
        if config.steps == 0 || config.steps > MAX_STEPS {
            return Err(SweepError::InvalidConfig("steps must be between 1 and 128"));
        }

        let x = convert(config.x).ok_or(SweepError::InvalidConfig("x must be finite"))?;

        let initial_step = convert(config.initial_step)
            .filter(|h| *h > T::zero())
            .ok_or(SweepError::InvalidConfig(
                "initial step must be finite and positive",
            ))?;

        let divisor = convert(config.divisor)
            .filter(|d| *d > T::one())
            .ok_or(SweepError::InvalidConfig(
                "divisor must be finite and greater than 1",
            ))?;

        Ok(Self {
            x,
            initial_step,
            divisor,
            steps: config.steps,
        })
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Runs every step in order, failing on the first domain error.
    pub fn run(&self) -> Result<ResultSeries<T>, SweepError> {
        self.run_with(|_| {})
    }

    /// Like [`Sweep::run`], calling `on_step` as soon as each step is done.
    pub fn run_with<F>(&self, mut on_step: F) -> Result<ResultSeries<T>, SweepError>
    where
        F: FnMut(&ErrorSample<T>),
    {
        log_debug!(
            "{} precision sweep: x={:e} h0={:e} divisor={:e} steps={}",
            T::NAME,
            self.x,
            self.initial_step,
            self.divisor,
            self.steps,
        );

        let mut series = ResultSeries::new();
        let mut h = self.initial_step;
        for index in 1..=self.steps {
            let estimate = estimate(self.x, h).map_err(|error| match error {
                EstimateError::ZeroStep => SweepError::StepUnderflow { index },
                error => SweepError::Estimate { index, error },
            })?;
            log_debug!(
                "step {}: h={:e} absolute error={:e}",
                index,
                h,
                estimate.absolute_error
            );
            let sample = ErrorSample { index, estimate };
            on_step(&sample);
            series
                .push(sample)
                .map_err(|_| SweepError::SeriesFull { index })?;
            h = h / self.divisor;
        }

        Ok(series)
    }
}

/// f64 to `T`, rejecting anything that is not finite in `T`.
fn convert<T: WorkingFloat>(value: f64) -> Option<T> {
    <T as NumCast>::from(value).filter(|v| v.is_finite())
}
