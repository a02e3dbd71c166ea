use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use roundoff_core::{Sweep, WorkingFloat, measure_epsilon};

use crate::config::RoundoffConfig;
use crate::histogram::{Histogram, HistogramSink};
use crate::plot;
use crate::trace::TraceWriter;

/// Sweeps in precision `T`, tracing each step as it completes, then persists and plots.
pub fn run<T: WorkingFloat, W: Write>(
    config: &RoundoffConfig,
    trace: &mut TraceWriter<W>,
) -> Result<()> {
    trace.write_measured_epsilon(measure_epsilon::<T>())?;

    let sweep = Sweep::<T>::new(&config.sweep)?;
    let sink = HistogramSink::create(
        &config.output.histogram,
        Histogram::for_steps(config.output.name.as_str(), sweep.steps()),
    )?;

    info!(
        "running {} step sweep at x = {:e} in {} precision",
        sweep.steps(),
        sweep.x(),
        config.precision
    );

    let mut traced: io::Result<()> = Ok(());
    let swept = sweep.run_with(|sample| {
        if traced.is_ok() {
            traced = trace.write_sample(sample);
        }
    });
    trace.flush()?;
    traced?;
    let series = swept.context("sweep failed")?;

    match series.minimum() {
        Some(best) => info!(
            "smallest error {:e} at step {} (h = {:e})",
            best.absolute_error(),
            best.index,
            best.step()
        ),
        None => warn!("sweep produced no samples"),
    }

    series.write_to(sink)?;

    if let Some(plot_path) = &config.output.plot {
        let errors: Vec<(usize, f64)> = series
            .samples()
            .iter()
            .map(|s| (s.index, s.absolute_error().into()))
            .collect();
        plot::plot_error_curve(plot_path, &config.output.name, &errors)
            .map_err(|e| anyhow!("failed to plot {}: {}", plot_path.display(), e))?;
        info!("error curve saved to {}", plot_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use csv::Reader;
    use roundoff_core::SweepConfig;

    use super::*;
    use crate::trace::TraceFormat;

    fn config_in(dir: &Path, sweep: SweepConfig) -> RoundoffConfig {
        let mut config = RoundoffConfig {
            sweep,
            ..Default::default()
        };
        config.output.histogram = dir.join("histos.csv");
        config
    }

    fn run_into<T: WorkingFloat>(config: &RoundoffConfig) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = run::<T, _>(config, &mut TraceWriter::new(&mut out, TraceFormat::default()));
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_run_writes_trace_histogram_and_plot() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), SweepConfig::default());
        config.output.plot = Some(dir.path().join("histos.png"));

        let (result, text) = run_into::<f64>(&config);
        result.unwrap();

        assert!(text.contains("measured double"));
        assert!(text.contains("Step 1\n"));
        assert!(text.contains("Step 80\n"));
        assert!(!text.contains("Step 81\n"));

        let rows: Vec<csv::StringRecord> = Reader::from_path(&config.output.histogram)
            .unwrap()
            .records()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(rows.len(), 80);
        assert_eq!(&rows[0][0], "hist");
        assert_eq!(&rows[79][1], "80");

        assert!(dir.path().join("histos.png").exists());
    }

    #[test]
    fn failed_run_still_traces_completed_steps() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            dir.path(),
            SweepConfig {
                divisor: 1e30,
                ..Default::default()
            },
        );

        let (result, text) = run_into::<f32>(&config);
        assert!(result.is_err());
        assert!(text.contains("Step 1\n"));
        assert!(text.contains("Step 2\n"));
        assert!(!text.contains("Step 3\n"));
    }

    #[test]
    fn invalid_sweep_fails_before_creating_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            dir.path(),
            SweepConfig {
                steps: 0,
                ..Default::default()
            },
        );

        let (result, _) = run_into::<f64>(&config);
        assert!(result.is_err());
        assert!(!config.output.histogram.exists());
    }
}
