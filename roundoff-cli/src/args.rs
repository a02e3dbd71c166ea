use std::fmt::Display;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "roundoff")]
#[command(bin_name = "roundoff")]
#[command(about = "sweep the forward difference step size and record truncation vs round-off error")]
pub struct Cli {
    #[arg(long, help = "config file, ./roundoff.toml is used when present")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, help = "working floating point precision")]
    pub precision: Option<Precision>,

    #[arg(long, allow_negative_numbers = true, help = "evaluation point")]
    pub x: Option<f64>,

    #[arg(long, help = "step size of the first iteration")]
    pub initial_step: Option<f64>,

    #[arg(long, help = "step size is divided by this every iteration")]
    pub divisor: Option<f64>,

    #[arg(long, help = "number of iterations")]
    pub steps: Option<usize>,

    #[arg(long, help = "histogram csv output path")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "also draw the error curve to this png")]
    pub plot: Option<PathBuf>,

    #[arg(long, help = "don't print the per step trace")]
    pub quiet: bool,
}

#[derive(
    clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Single,
    #[default]
    Double,
}

impl Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::Single => write!(f, "single"),
            Precision::Double => write!(f, "double"),
        }
    }
}
