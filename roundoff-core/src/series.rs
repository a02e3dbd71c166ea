use heapless::Vec;

use crate::{Estimate, MAX_STEPS, WorkingFloat};

/// One sweep step. `index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSample<T: WorkingFloat> {
    pub index: usize,
    pub estimate: Estimate<T>,
}

impl<T: WorkingFloat> ErrorSample<T> {
    pub fn step(&self) -> T {
        self.estimate.step
    }

    pub fn absolute_error(&self) -> T {
        self.estimate.absolute_error
    }
}

/// Receives the per-step error magnitude and persists it.
pub trait ResultSink {
    type Error;

    /// Insert or overwrite the value at the 1-based `index`.
    fn record(&mut self, index: usize, value: f64) -> Result<(), Self::Error>;

    /// Flush and close the persisted series.
    fn finalize(self) -> Result<(), Self::Error>;
}

/// Error samples of a finished sweep, ordered by step index.
#[derive(Debug, Clone)]
pub struct ResultSeries<T: WorkingFloat> {
    samples: Vec<ErrorSample<T>, MAX_STEPS>,
}

impl<T: WorkingFloat> ResultSeries<T> {
    pub(crate) fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// Appends the next step. Hands the sample back when the series is full.
    pub(crate) fn push(&mut self, sample: ErrorSample<T>) -> Result<(), ErrorSample<T>> {
        debug_assert_eq!(sample.index, self.samples.len() + 1);
        self.samples.push(sample)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[ErrorSample<T>] {
        &self.samples
    }

    /// Sample for the 1-based step `index`.
    pub fn get(&self, index: usize) -> Option<&ErrorSample<T>> {
        index.checked_sub(1).and_then(|i| self.samples.get(i))
    }

    /// Step with the smallest absolute error, the first one on ties.
    pub fn minimum(&self) -> Option<&ErrorSample<T>> {
        self.samples.iter().fold(None, |best: Option<&ErrorSample<T>>, sample| {
            match best {
                Some(b) if b.absolute_error() <= sample.absolute_error() => Some(b),
                _ => Some(sample),
            }
        })
    }

    /// Records every absolute error into `sink`, then finalizes it.
    pub fn write_to<S: ResultSink>(&self, mut sink: S) -> Result<(), S::Error> {
        for sample in self.samples.iter() {
            sink.record(sample.index, sample.absolute_error().into())?;
        }
        sink.finalize()
    }
}
