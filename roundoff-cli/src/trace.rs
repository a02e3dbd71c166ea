use std::fmt::LowerExp;
use std::io::{self, Write};

use roundoff_core::{ErrorSample, MachineEpsilons, WorkingFloat};
use serde::{Deserialize, Serialize};

/// Number formatting of the stdout trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceFormat {
    /// print every sweep step
    pub enabled: bool,
    pub width: usize,
    /// digits after the decimal point
    pub precision: usize,
}

impl Default for TraceFormat {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 27,
            precision: 20,
        }
    }
}

pub struct TraceWriter<W: Write> {
    out: W,
    format: TraceFormat,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W, format: TraceFormat) -> Self {
        Self { out, format }
    }

    pub fn write_epsilons(&mut self, epsilons: &MachineEpsilons) -> io::Result<()> {
        self.line("single epsilon", epsilons.single)?;
        self.line("double epsilon", epsilons.double)?;
        self.line("extended eps.", epsilons.extended)
    }

    pub fn write_measured_epsilon<T: WorkingFloat>(&mut self, epsilon: T) -> io::Result<()> {
        self.line(&format!("measured {}", T::NAME), epsilon)?;
        writeln!(self.out, " ")
    }

    pub fn write_sample<T: WorkingFloat>(&mut self, sample: &ErrorSample<T>) -> io::Result<()> {
        if !self.format.enabled {
            return Ok(());
        }

        let e = &sample.estimate;
        writeln!(self.out, "Step {}", sample.index)?;
        self.line("h", e.step)?;
        self.line("x+h", e.shifted)?;
        self.line("f(x+h)", e.f_shifted)?;
        self.line("f(x)", e.f_x)?;
        self.line("f(x+h)-f(x)", e.difference)?;
        self.line("Est. f'(x)", e.estimated)?;
        self.line("True f'(x)", e.true_derivative)?;
        self.line("Rel. error", e.relative_error)?;
        writeln!(self.out, " ")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn line<T: LowerExp>(&mut self, label: &str, value: T) -> io::Result<()> {
        writeln!(
            self.out,
            "{:>14}: {:>width$.precision$e}",
            label,
            value,
            width = self.format.width,
            precision = self.format.precision,
        )
    }
}
