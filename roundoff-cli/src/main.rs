use std::io;

use anyhow::Result;
use args::{Cli, Precision};
use clap::Parser;
use config::RoundoffConfig;
use log::LevelFilter;
use roundoff_core::MachineEpsilons;
use trace::TraceWriter;

mod args;
mod config;
mod histogram;
mod plot;
mod runner;
mod trace;

fn main() -> Result<()> {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init();

    let args = Cli::parse();
    let mut config = RoundoffConfig::load(args.config.as_deref())?;
    config.apply_args(&args);

    let stdout = io::stdout();
    let mut trace = TraceWriter::new(stdout.lock(), config.trace.clone());
    trace.write_epsilons(&MachineEpsilons::new())?;

    match config.precision {
        Precision::Single => runner::run::<f32, _>(&config, &mut trace),
        Precision::Double => runner::run::<f64, _>(&config, &mut trace),
    }
}
