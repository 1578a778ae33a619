use crate::config::validate_fraction;
use crate::error::{Result, WordCountError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists every regular file under `root`, recursively.
///
/// Entries are sorted by file name within each directory, so the order is
/// the same on every run and every platform.
pub fn enumerate_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            WordCountError::CorpusAccess {
                path,
                source: e.into(),
            }
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// The first `floor(len * fraction)` files
pub fn slice_by_fraction(files: &[PathBuf], fraction: f64) -> Result<&[PathBuf]> {
    validate_fraction(fraction)?;
    let count = ((files.len() as f64) * fraction).floor() as usize;
    Ok(&files[..count.min(files.len())])
}
