// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::{signal, spawn};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use word_count_core::config::{host_parallelism, FailurePolicy, SweepConfig};
use word_count_core::corpus;
use word_count_core::report::FileReporter;
use word_count_core::sweep::{ExperimentDriver, RunRecord};
use word_count_core::utils::{generate_corpus, CorpusShape};
use word_count_task_channels::channel_coordinator;

#[derive(Parser)]
#[command(
    name = "word-count-task-channels",
    about = "Measures how parallel word counting scales with the number of workers"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every (fraction, worker count) configuration and write reports
    Sweep(SweepArgs),
    /// Count the words of a corpus once
    Count(CountArgs),
    /// Write a synthetic corpus
    Generate(GenerateArgs),
}

#[derive(Args)]
struct SweepArgs {
    /// JSON sweep configuration; defaults are used if the file is missing
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    #[arg(long)]
    corpus: Option<PathBuf>,
    #[arg(long)]
    results: Option<PathBuf>,
    /// Comma-separated corpus fractions, e.g. 0.25,0.5,1
    #[arg(long, value_delimiter = ',')]
    fractions: Option<Vec<f64>>,
    #[arg(long)]
    max_workers: Option<usize>,
    #[arg(long, value_enum)]
    on_error: Option<OnError>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnError {
    Abort,
    SkipRun,
}

impl From<OnError> for FailurePolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Abort => FailurePolicy::Abort,
            OnError::SkipRun => FailurePolicy::SkipRun,
        }
    }
}

#[derive(Args)]
struct CountArgs {
    #[arg(long)]
    corpus: PathBuf,
    #[arg(long, default_value_t = 1)]
    workers: usize,
    #[arg(long, default_value_t = 1.0)]
    fraction: f64,
    /// Number of most frequent words to print
    #[arg(long, default_value_t = 20)]
    top: usize,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long)]
    out: PathBuf,
    #[arg(long, default_value_t = 100)]
    files: usize,
    #[arg(long, default_value_t = 200)]
    lines: usize,
    #[arg(long, default_value_t = 12)]
    words_per_line: usize,
    #[arg(long, default_value_t = 8)]
    max_word_length: usize,
    /// Seed for reproducible output; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 1)
        .with_thread_ids(verbose >= 2)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Setup Ctrl+C handler
    let cancel_token = CancellationToken::new();
    let ctrl_c_token = cancel_token.clone();
    spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Ctrl+C received, initiating shutdown");
            ctrl_c_token.cancel();
        }
    });

    match cli.command {
        Command::Sweep(args) => run_sweep(args, cancel_token).await,
        Command::Count(args) => run_count(args, cancel_token).await,
        Command::Generate(args) => run_generate(args),
    }
}

async fn run_sweep(args: SweepArgs, cancel_token: CancellationToken) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args.config)?;
    if let Some(corpus) = args.corpus {
        config.corpus_root = corpus;
    }
    if let Some(results) = args.results {
        config.results_dir = results;
    }
    if let Some(fractions) = args.fractions {
        config.fractions = fractions;
    }
    if let Some(max_workers) = args.max_workers {
        config.max_workers = max_workers;
    }
    if let Some(on_error) = args.on_error {
        config.failure_policy = on_error.into();
    }
    config.validate()?;
    config.log_summary();

    let files = corpus::enumerate_files(&config.corpus_root).with_context(|| {
        format!(
            "failed to enumerate corpus under {}",
            config.corpus_root.display()
        )
    })?;
    if files.is_empty() {
        warn!(corpus = %config.corpus_root.display(), "corpus is empty");
    }

    let reporter = FileReporter::new(&config.results_dir)?;
    let mut driver = ExperimentDriver::new(
        channel_coordinator(cancel_token),
        reporter,
        config,
        host_parallelism(),
    );
    let records = driver.run(&files).await.context("sweep failed")?;

    print_sweep_results(&records);
    println!("\nTotal time: {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn load_config(path: &Path) -> Result<SweepConfig> {
    if path.exists() {
        SweepConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))
    } else {
        info!(
            config = %path.display(),
            "configuration file not found, using defaults"
        );
        Ok(SweepConfig::default())
    }
}

fn print_sweep_results(records: &[RunRecord]) {
    println!("\n=== RESULTS ===");
    println!(
        "{:>9} {:>8} {:>8} {:>12} {:>14}",
        "fraction", "workers", "files", "elapsed (s)", "total words"
    );
    for record in records {
        println!(
            "{:>8}% {:>8} {:>8} {:>12.2} {:>14}",
            record.config.fraction * 100.0,
            record.config.workers,
            record.files,
            record.elapsed_secs,
            record.total_words
        );
    }
}

async fn run_count(args: CountArgs, cancel_token: CancellationToken) -> Result<()> {
    let start_time = Instant::now();

    let files = corpus::enumerate_files(&args.corpus).with_context(|| {
        format!("failed to enumerate corpus under {}", args.corpus.display())
    })?;
    let subset = corpus::slice_by_fraction(&files, args.fraction)?;

    let mut coordinator = channel_coordinator(cancel_token);
    let aggregate = coordinator.run(subset, args.workers).await?;

    println!("\n=== RESULTS ===");
    for (word, count) in aggregate.words.top(args.top) {
        println!("{}: {}", word, count);
    }
    if aggregate.words.len() > args.top {
        println!("... ({} more words)", aggregate.words.len() - args.top);
    }

    println!("\nFiles processed: {}", subset.len());
    println!("Distinct words: {}", aggregate.words.len());
    println!("Total words counted: {}", aggregate.total);
    println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    let shape = CorpusShape {
        num_files: args.files,
        lines_per_file: args.lines,
        words_per_line: args.words_per_line,
        max_word_length: args.max_word_length,
    };

    let files = generate_corpus(&args.out, shape, &mut rng)?;
    println!(
        "Generated {} files under {} (seed {})",
        files.len(),
        args.out.display(),
        seed
    );
    Ok(())
}
