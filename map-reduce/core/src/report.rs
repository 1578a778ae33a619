use crate::error::{Result, WordCountError};
use crate::sweep::RunRecord;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;

/// Consumer of sweep output
pub trait RecordSink {
    /// Called once per completed configuration
    fn record(&mut self, record: &RunRecord) -> Result<()>;

    /// Called after every worker count of `fraction` has been tried
    fn finish_fraction(&mut self, _fraction: f64, _records: &[RunRecord]) -> Result<()> {
        Ok(())
    }
}

impl RecordSink for Vec<RunRecord> {
    fn record(&mut self, record: &RunRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Writes a text report per configuration and a JSON series per fraction
pub struct FileReporter {
    results_dir: PathBuf,
}

impl FileReporter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Result<Self> {
        let results_dir = results_dir.into();
        fs::create_dir_all(&results_dir).map_err(|source| WordCountError::Report {
            path: results_dir.clone(),
            source,
        })?;
        Ok(Self { results_dir })
    }

    pub fn report_path(&self, fraction: f64, workers: usize) -> PathBuf {
        self.results_dir.join(format!(
            "results_{}percent_{}workers.txt",
            percent(fraction),
            workers
        ))
    }

    pub fn series_path(&self, fraction: f64) -> PathBuf {
        self.results_dir
            .join(format!("series_{}percent.json", percent(fraction)))
    }
}

impl RecordSink for FileReporter {
    fn record(&mut self, record: &RunRecord) -> Result<()> {
        let path = self.report_path(record.config.fraction, record.config.workers);
        let io_error = |source| WordCountError::Report {
            path: path.clone(),
            source,
        };

        let mut writer = BufWriter::new(File::create(&path).map_err(io_error)?);
        writer
            .write_all(format_record(record).as_bytes())
            .and_then(|_| writer.flush())
            .map_err(io_error)?;

        debug!(report = %path.display(), "wrote run report");
        Ok(())
    }

    fn finish_fraction(&mut self, fraction: f64, records: &[RunRecord]) -> Result<()> {
        let path = self.series_path(fraction);
        let file = File::create(&path).map_err(|source| WordCountError::Report {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), records)?;

        debug!(series = %path.display(), "wrote fraction series");
        Ok(())
    }
}

/// Human-readable block describing one run
pub fn format_record(record: &RunRecord) -> String {
    format!(
        "Dataset fraction: {}%\n\
         Workers: {}\n\
         Files processed: {}\n\
         Processing time: {:.2} seconds\n\
         Total words counted: {}\n\
         ------------------------------\n",
        record.config.fraction * 100.0,
        record.config.workers,
        record.files,
        record.elapsed_secs,
        record.total_words
    )
}

fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}
