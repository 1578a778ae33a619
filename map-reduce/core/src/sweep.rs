use crate::config::{FailurePolicy, RunConfig, SweepConfig};
use crate::coordinator::BatchCounter;
use crate::corpus;
use crate::error::Result;
use crate::report::RecordSink;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Timing and word count of one (fraction, worker count) configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(flatten)]
    pub config: RunConfig,
    /// Files in the fraction's slice of the corpus
    pub files: usize,
    pub elapsed_secs: f64,
    pub total_words: u64,
}

/// Drives the fraction x worker-count sweep
pub struct ExperimentDriver<C, S> {
    counter: C,
    sink: S,
    config: SweepConfig,
    host_parallelism: usize,
}

impl<C, S> ExperimentDriver<C, S>
where
    C: BatchCounter,
    S: RecordSink,
{
    pub fn new(counter: C, sink: S, config: SweepConfig, host_parallelism: usize) -> Self {
        Self {
            counter,
            sink,
            config,
            host_parallelism,
        }
    }

    /// Runs every configuration over `files` and returns the records in
    /// sweep order. Configuration problems are reported before any file is
    /// touched.
    pub async fn run(&mut self, files: &[PathBuf]) -> Result<Vec<RunRecord>> {
        self.config.validate()?;

        let max_workers = self.config.effective_max_workers(self.host_parallelism);
        let fractions = self.config.sorted_fractions();
        info!(
            files = files.len(),
            fractions = ?fractions,
            max_workers,
            "starting sweep"
        );

        let mut records = Vec::new();
        for fraction in fractions {
            let subset = corpus::slice_by_fraction(files, fraction)?;
            let mut fraction_records = Vec::with_capacity(max_workers);

            for workers in 1..=max_workers {
                let run = RunConfig::new(fraction, workers)?;
                if let Some(record) = self.run_once(run, subset).await? {
                    self.sink.record(&record)?;
                    fraction_records.push(record);
                }
            }

            check_consistent_totals(fraction, &fraction_records);
            self.sink.finish_fraction(fraction, &fraction_records)?;
            records.extend(fraction_records);
        }

        info!(records = records.len(), "sweep finished");
        Ok(records)
    }

    /// Consumes the driver, handing back the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    async fn run_once(&mut self, run: RunConfig, files: &[PathBuf]) -> Result<Option<RunRecord>> {
        let start = Instant::now();
        let outcome = self.counter.count(files, run.workers).await;
        let elapsed_secs = start.elapsed().as_secs_f64();

        match outcome {
            Ok(aggregate) => {
                let record = RunRecord {
                    config: run,
                    files: files.len(),
                    elapsed_secs,
                    total_words: aggregate.total,
                };
                info!(
                    fraction = run.fraction,
                    workers = run.workers,
                    files = record.files,
                    elapsed_secs,
                    total_words = record.total_words,
                    "run complete"
                );
                Ok(Some(record))
            }
            Err(e)
                if e.is_corpus_access()
                    && self.config.failure_policy == FailurePolicy::SkipRun =>
            {
                warn!(
                    fraction = run.fraction,
                    workers = run.workers,
                    error = %e,
                    "skipping run after corpus access failure"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn check_consistent_totals(fraction: f64, records: &[RunRecord]) {
    let Some(first) = records.first() else {
        return;
    };
    if let Some(odd) = records.iter().find(|r| r.total_words != first.total_words) {
        warn!(
            fraction,
            expected = first.total_words,
            workers = odd.config.workers,
            found = odd.total_words,
            "total word count differs across worker counts"
        );
    }
}
