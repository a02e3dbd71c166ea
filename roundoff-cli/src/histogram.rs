use anyhow::{Context, Result, bail};
use csv::Writer;
use log::info;
use roundoff_core::ResultSink;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Fixed width binned series with single precision contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    name: String,
    low: f64,
    high: f64,
    contents: Vec<f32>,
}

impl Histogram {
    pub fn new(name: impl Into<String>, bins: usize, low: f64, high: f64) -> Self {
        Self {
            name: name.into(),
            low,
            high,
            contents: vec![0.0; bins],
        }
    }

    /// One bin per step, centred on the 1-based step index.
    pub fn for_steps(name: impl Into<String>, steps: usize) -> Self {
        Self::new(name, steps, 0.5, steps as f64 + 0.5)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bins(&self) -> usize {
        self.contents.len()
    }

    fn bin_width(&self) -> f64 {
        (self.high - self.low) / self.bins() as f64
    }

    /// 1-based bin holding `x`, bins are [low edge, high edge).
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if self.bins() == 0 || !(x >= self.low && x < self.high) {
            return None;
        }
        let bin = ((x - self.low) / self.bin_width()) as usize + 1;
        Some(bin.min(self.bins()))
    }

    pub fn bin_edges(&self, bin: usize) -> (f64, f64) {
        let width = self.bin_width();
        let low = self.low + (bin as f64 - 1.0) * width;
        (low, low + width)
    }

    pub fn content(&self, bin: usize) -> Option<f32> {
        bin.checked_sub(1).and_then(|i| self.contents.get(i)).copied()
    }

    /// Overwrites the bin holding `x`.
    pub fn set(&mut self, x: f64, value: f32) -> Option<usize> {
        let bin = self.find_bin(x)?;
        self.contents[bin - 1] = value;
        Some(bin)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct BinRow {
    histogram: String,
    bin: usize,
    low_edge: f64,
    high_edge: f64,
    content: f32,
}

/// Collects step errors into a [`Histogram`] and writes it out as csv on finalize.
pub struct HistogramSink {
    histogram: Histogram,
    writer: Writer<File>,
    path: PathBuf,
}

impl HistogramSink {
    /// Truncates or creates `path` right away so an unwritable path fails early.
    pub fn create(path: &Path, histogram: Histogram) -> Result<Self> {
        let writer = Writer::from_path(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self {
            histogram,
            writer,
            path: path.to_path_buf(),
        })
    }
}

impl ResultSink for HistogramSink {
    type Error = anyhow::Error;

    fn record(&mut self, index: usize, value: f64) -> Result<()> {
        if self.histogram.set(index as f64, value as f32).is_none() {
            bail!(
                "step {} is outside the {} bins of histogram {}",
                index,
                self.histogram.bins(),
                self.histogram.name()
            );
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<()> {
        for bin in 1..=self.histogram.bins() {
            let (low_edge, high_edge) = self.histogram.bin_edges(bin);
            self.writer.serialize(BinRow {
                histogram: self.histogram.name().to_string(),
                bin,
                low_edge,
                high_edge,
                content: self.histogram.content(bin).unwrap_or_default(),
            })?;
        }
        self.writer
            .flush()
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        info!(
            "histogram {} ({} bins) saved to {}",
            self.histogram.name(),
            self.histogram.bins(),
            self.path.display()
        );
        Ok(())
    }
}
