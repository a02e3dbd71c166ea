use anyhow::{Context, Result};
use roundoff_core::SweepConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::{Cli, Precision};
use crate::trace::TraceFormat;

pub const DEFAULT_CONFIG_PATH: &str = "roundoff.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundoffConfig {
    pub precision: Precision,
    pub sweep: SweepConfig,
    pub output: OutputConfig,
    pub trace: TraceFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// recreated on every run
    pub histogram: PathBuf,
    pub name: String,
    pub plot: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            histogram: "histos.csv".into(),
            name: "hist".into(),
            plot: None,
        }
    }
}

impl RoundoffConfig {
    /// An explicit path must exist; otherwise `roundoff.toml` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_or_default(path, Path::new(DEFAULT_CONFIG_PATH))
    }

    fn load_or_default(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if default_path.exists() => Self::from_file(default_path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Command line flags win over the file.
    pub fn apply_args(&mut self, args: &Cli) {
        if let Some(precision) = args.precision {
            self.precision = precision;
        }
        if let Some(x) = args.x {
            self.sweep.x = x;
        }
        if let Some(initial_step) = args.initial_step {
            self.sweep.initial_step = initial_step;
        }
        if let Some(divisor) = args.divisor {
            self.sweep.divisor = divisor;
        }
        if let Some(steps) = args.steps {
            self.sweep.steps = steps;
        }
        if let Some(output) = &args.output {
            self.output.histogram = output.clone();
        }
        if let Some(plot) = &args.plot {
            self.output.plot = Some(plot.clone());
        }
        if args.quiet {
            self.trace.enabled = false;
        }
    }
}
