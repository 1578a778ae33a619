use crate::error::{Result, WordCountError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::info;

/// One sweep iteration: which share of the corpus, and how many workers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub fraction: f64,
    pub workers: usize,
}

impl RunConfig {
    pub fn new(fraction: f64, workers: usize) -> Result<Self> {
        validate_fraction(fraction)?;
        if workers == 0 {
            return Err(WordCountError::configuration(
                "worker count must be at least 1",
            ));
        }
        Ok(Self { fraction, workers })
    }
}

/// What to do when a corpus file cannot be read during a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the whole sweep on the first unreadable file
    #[default]
    Abort,
    /// Drop the record for the failing configuration and keep sweeping
    SkipRun,
}

/// Sweep configuration, loaded from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub corpus_root: PathBuf,
    pub results_dir: PathBuf,
    /// Corpus fractions to test, each in (0, 1]
    pub fractions: Vec<f64>,
    /// Upper bound on the worker counts tried; further capped by the host
    pub max_workers: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            corpus_root: PathBuf::from("corpus"),
            results_dir: PathBuf::from("results"),
            fractions: vec![0.25, 0.5, 1.0],
            max_workers: 5,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl SweepConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            WordCountError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: SweepConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Rejects empty or out-of-range fractions and a zero worker cap
    pub fn validate(&self) -> Result<()> {
        if self.fractions.is_empty() {
            return Err(WordCountError::configuration(
                "at least one corpus fraction is required",
            ));
        }
        for &fraction in &self.fractions {
            validate_fraction(fraction)?;
        }
        if self.max_workers == 0 {
            return Err(WordCountError::configuration(
                "max_workers must be at least 1",
            ));
        }
        Ok(())
    }

    /// Fractions in ascending order, duplicates removed
    pub fn sorted_fractions(&self) -> Vec<f64> {
        let mut fractions = self.fractions.clone();
        fractions.sort_by(f64::total_cmp);
        fractions.dedup();
        fractions
    }

    /// Largest worker count the sweep will try on a host with
    /// `host_parallelism` hardware threads
    pub fn effective_max_workers(&self, host_parallelism: usize) -> usize {
        self.max_workers.min(host_parallelism).max(1)
    }

    pub fn log_summary(&self) {
        info!(
            corpus = %self.corpus_root.display(),
            results = %self.results_dir.display(),
            fractions = ?self.fractions,
            max_workers = self.max_workers,
            failure_policy = ?self.failure_policy,
            "sweep configuration"
        );
    }
}

/// Hardware threads available to this process, at least 1
pub fn host_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

pub(crate) fn validate_fraction(fraction: f64) -> Result<()> {
    if fraction > 0.0 && fraction <= 1.0 {
        Ok(())
    } else {
        Err(WordCountError::Configuration(format!(
            "fraction {} is outside (0, 1]",
            fraction
        )))
    }
}
