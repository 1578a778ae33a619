// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fs;
use std::io;
use std::path::PathBuf;
use tempfile::TempDir;
use word_count_core::config::{FailurePolicy, SweepConfig};
use word_count_core::coordinator::BatchCounter;
use word_count_core::reducer::AggregateResult;
use word_count_core::report::{format_record, FileReporter};
use word_count_core::sweep::{ExperimentDriver, RunRecord};
use word_count_core::word_table::WordTable;
use word_count_core::{Result, WordCountError};

/// Counter that reports ten words per file and can fail for one worker count
#[derive(Default)]
struct FakeCounter {
    calls: Vec<(usize, usize)>,
    fail_with_workers: Option<usize>,
    cancel_with_workers: Option<usize>,
}

impl BatchCounter for FakeCounter {
    async fn count(&mut self, files: &[PathBuf], num_workers: usize) -> Result<AggregateResult> {
        self.calls.push((files.len(), num_workers));

        if self.fail_with_workers == Some(num_workers) {
            return Err(WordCountError::CorpusAccess {
                path: PathBuf::from("gone.txt"),
                source: io::Error::new(io::ErrorKind::NotFound, "gone"),
            });
        }
        if self.cancel_with_workers == Some(num_workers) {
            return Err(WordCountError::Cancelled);
        }

        Ok(AggregateResult {
            words: WordTable::new(),
            total: files.len() as u64 * 10,
        })
    }
}

fn files(n: usize) -> Vec<PathBuf> {
    (0..n).map(|i| PathBuf::from(format!("doc_{}.txt", i))).collect()
}

fn config(max_workers: usize, failure_policy: FailurePolicy) -> SweepConfig {
    SweepConfig {
        max_workers,
        failure_policy,
        ..SweepConfig::default()
    }
}

// ============================================================
// Sweep order and bounds
// ============================================================

#[tokio::test]
async fn test_sweeps_every_fraction_and_worker_count() {
    let mut counter = FakeCounter::default();
    let mut driver = ExperimentDriver::new(
        &mut counter,
        Vec::new(),
        config(5, FailurePolicy::Abort),
        3,
    );

    let records = driver.run(&files(8)).await.unwrap();
    let sink = driver.into_sink();

    let shape: Vec<(f64, usize, usize)> = records
        .iter()
        .map(|r| (r.config.fraction, r.config.workers, r.files))
        .collect();
    assert_eq!(
        shape,
        vec![
            (0.25, 1, 2),
            (0.25, 2, 2),
            (0.25, 3, 2),
            (0.5, 1, 4),
            (0.5, 2, 4),
            (0.5, 3, 4),
            (1.0, 1, 8),
            (1.0, 2, 8),
            (1.0, 3, 8),
        ]
    );
    assert_eq!(sink, records);
    assert!(records.iter().all(|r| r.total_words == r.files as u64 * 10));
    assert!(records.iter().all(|r| r.elapsed_secs >= 0.0));
    assert_eq!(counter.calls.len(), 9);
}

#[tokio::test]
async fn test_single_core_host_only_tries_one_worker() {
    let mut counter = FakeCounter::default();
    let mut driver = ExperimentDriver::new(
        &mut counter,
        Vec::new(),
        config(5, FailurePolicy::Abort),
        1,
    );

    let records = driver.run(&files(4)).await.unwrap();

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.config.workers == 1));
}

#[tokio::test]
async fn test_invalid_configuration_fails_before_counting() {
    let mut counter = FakeCounter::default();
    let bad = SweepConfig {
        fractions: vec![-0.5, 1.0],
        ..SweepConfig::default()
    };
    let mut driver = ExperimentDriver::new(&mut counter, Vec::new(), bad, 4);

    let result = driver.run(&files(4)).await;
    drop(driver);

    assert!(matches!(result, Err(WordCountError::Configuration(_))));
    assert!(counter.calls.is_empty());
}

// ============================================================
// Failure policy
// ============================================================

#[tokio::test]
async fn test_abort_policy_stops_sweep_on_corpus_error() {
    let mut counter = FakeCounter {
        fail_with_workers: Some(2),
        ..FakeCounter::default()
    };
    let mut driver = ExperimentDriver::new(
        &mut counter,
        Vec::new(),
        config(3, FailurePolicy::Abort),
        3,
    );

    let result = driver.run(&files(8)).await;
    let sink = driver.into_sink();

    assert!(result.unwrap_err().is_corpus_access());
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].config.workers, 1);
    assert_eq!(counter.calls, vec![(2, 1), (2, 2)]);
}

#[tokio::test]
async fn test_skip_policy_drops_only_failing_configurations() {
    let mut counter = FakeCounter {
        fail_with_workers: Some(2),
        ..FakeCounter::default()
    };
    let mut driver = ExperimentDriver::new(
        &mut counter,
        Vec::new(),
        config(3, FailurePolicy::SkipRun),
        3,
    );

    let records = driver.run(&files(8)).await.unwrap();
    drop(driver);

    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.config.workers != 2));
    assert_eq!(counter.calls.len(), 9);
}

#[tokio::test]
async fn test_skip_policy_still_aborts_on_cancellation() {
    let mut counter = FakeCounter {
        cancel_with_workers: Some(2),
        ..FakeCounter::default()
    };
    let mut driver = ExperimentDriver::new(
        &mut counter,
        Vec::new(),
        config(3, FailurePolicy::SkipRun),
        3,
    );

    let result = driver.run(&files(8)).await;

    assert!(matches!(result, Err(WordCountError::Cancelled)));
}

// ============================================================
// FileReporter
// ============================================================

#[tokio::test]
async fn test_file_reporter_writes_reports_and_series() {
    let dir = TempDir::new().unwrap();
    let reporter = FileReporter::new(dir.path().join("results")).unwrap();
    let sweep = SweepConfig {
        fractions: vec![0.5, 1.0],
        max_workers: 2,
        ..SweepConfig::default()
    };
    let mut driver = ExperimentDriver::new(FakeCounter::default(), reporter, sweep, 2);

    driver.run(&files(4)).await.unwrap();
    let reporter = driver.into_sink();

    for (fraction, workers) in [(0.5, 1), (0.5, 2), (1.0, 1), (1.0, 2)] {
        let report = fs::read_to_string(reporter.report_path(fraction, workers)).unwrap();
        assert!(report.contains(&format!("Workers: {}", workers)));
    }
    assert!(reporter
        .report_path(0.5, 1)
        .ends_with("results_50percent_1workers.txt"));

    let series = fs::read_to_string(reporter.series_path(1.0)).unwrap();
    let records: Vec<RunRecord> = serde_json::from_str(&series).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.total_words == 40));
}

#[test]
fn test_format_record() {
    let record = RunRecord {
        config: word_count_core::config::RunConfig::new(0.25, 3).unwrap(),
        files: 4,
        elapsed_secs: 1.234,
        total_words: 24,
    };

    let text = format_record(&record);

    assert!(text.contains("Dataset fraction: 25%"));
    assert!(text.contains("Workers: 3"));
    assert!(text.contains("Processing time: 1.23 seconds"));
    assert!(text.contains("Total words counted: 24"));
}
