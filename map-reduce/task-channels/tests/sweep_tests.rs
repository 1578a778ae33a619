// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use word_count_core::config::{FailurePolicy, SweepConfig};
use word_count_core::corpus::enumerate_files;
use word_count_core::report::FileReporter;
use word_count_core::sweep::{ExperimentDriver, RunRecord};
use word_count_core::utils::{generate_corpus, CorpusShape};
use word_count_task_channels::channel_coordinator;

fn corpus(dir: &TempDir) -> Vec<PathBuf> {
    let root = dir.path().join("corpus");
    let shape = CorpusShape {
        num_files: 8,
        lines_per_file: 25,
        words_per_line: 8,
        max_word_length: 5,
    };
    generate_corpus(&root, shape, &mut StdRng::seed_from_u64(42)).unwrap();
    enumerate_files(&root).unwrap()
}

fn sweep_config(dir: &TempDir, failure_policy: FailurePolicy) -> SweepConfig {
    SweepConfig {
        corpus_root: dir.path().join("corpus"),
        results_dir: dir.path().join("results"),
        fractions: vec![0.5, 1.0],
        max_workers: 3,
        failure_policy,
    }
}

fn totals_for(records: &[RunRecord], fraction: f64) -> Vec<u64> {
    records
        .iter()
        .filter(|r| r.config.fraction == fraction)
        .map(|r| r.total_words)
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_sweep_over_generated_corpus() {
    let dir = TempDir::new().unwrap();
    let files = corpus(&dir);
    let config = sweep_config(&dir, FailurePolicy::Abort);
    let reporter = FileReporter::new(&config.results_dir).unwrap();

    let mut driver = ExperimentDriver::new(
        channel_coordinator(CancellationToken::new()),
        reporter,
        config,
        3,
    );
    let records = driver.run(&files).await.unwrap();
    let reporter = driver.into_sink();

    assert_eq!(records.len(), 6);
    assert_eq!(totals_for(&records, 0.5), vec![4 * 25 * 8; 3]);
    assert_eq!(totals_for(&records, 1.0), vec![8 * 25 * 8; 3]);

    for record in &records {
        let path = reporter.report_path(record.config.fraction, record.config.workers);
        assert!(path.exists(), "missing report {}", path.display());
    }
    let series: Vec<RunRecord> =
        serde_json::from_str(&fs::read_to_string(reporter.series_path(0.5)).unwrap()).unwrap();
    assert_eq!(series.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_missing_file_under_abort_policy_fails_sweep() {
    let dir = TempDir::new().unwrap();
    let mut files = corpus(&dir);
    files.push(dir.path().join("corpus").join("vanished.txt"));

    let mut driver = ExperimentDriver::new(
        channel_coordinator(CancellationToken::new()),
        Vec::new(),
        sweep_config(&dir, FailurePolicy::Abort),
        3,
    );
    let result = driver.run(&files).await;

    assert!(result.unwrap_err().is_corpus_access());
    // The half-corpus slice excludes the missing file and completed first
    assert_eq!(driver.into_sink().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_missing_file_under_skip_policy_keeps_other_runs() {
    let dir = TempDir::new().unwrap();
    let mut files = corpus(&dir);
    files.push(dir.path().join("corpus").join("vanished.txt"));
    files.push(dir.path().join("corpus").join("vanished_too.txt"));

    let mut driver = ExperimentDriver::new(
        channel_coordinator(CancellationToken::new()),
        Vec::new(),
        sweep_config(&dir, FailurePolicy::SkipRun),
        3,
    );
    let records = driver.run(&files).await.unwrap();

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.config.fraction == 0.5));
    assert!(records.iter().all(|r| r.files == 5));
}
