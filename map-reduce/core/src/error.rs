use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for word-count operations
pub type Result<T> = std::result::Result<T, WordCountError>;

/// Errors surfaced by the word-count engine and its collaborators
#[derive(Error, Debug)]
pub enum WordCountError {
    /// A corpus file could not be opened or read while mapping
    #[error("cannot read corpus file {}: {source}", path.display())]
    CorpusAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid worker count, fraction or configuration content
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A mapper call panicked while processing a file
    #[error("worker panicked while mapping {}: {reason}", path.display())]
    WorkerPanicked { path: PathBuf, reason: String },

    /// A worker's completion stream ended before it reported
    #[error("worker {worker_id} stopped before reporting its assignment")]
    WorkerLost { worker_id: usize },

    /// Shutdown was requested while a batch was in flight
    #[error("run cancelled by shutdown signal")]
    Cancelled,

    /// A report file could not be written
    #[error("cannot write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WordCountError {
    pub fn configuration(message: impl Into<String>) -> Self {
        WordCountError::Configuration(message.into())
    }

    /// True for failures caused by unreadable corpus content
    pub fn is_corpus_access(&self) -> bool {
        matches!(self, WordCountError::CorpusAccess { .. })
    }
}
