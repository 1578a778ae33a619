use crate::error::{Result, WordCountError};
use rand::Rng;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Shape of a synthetic corpus
#[derive(Debug, Clone, Copy)]
pub struct CorpusShape {
    pub num_files: usize,
    pub lines_per_file: usize,
    pub words_per_line: usize,
    pub max_word_length: usize,
}

const TRAILING_PUNCTUATION: [&str; 6] = [".", ",", "!", "?", ";", ":"];

pub fn generate_random_string(rng: &mut impl Rng, max_length: usize) -> String {
    let length = rng.random_range(1..=max_length);
    (0..length)
        .map(|_| {
            let c = rng.random_range(b'a'..=b'z');
            c as char
        })
        .collect()
}

/// Random text line; some words are capitalized or followed by punctuation
pub fn generate_line(rng: &mut impl Rng, words: usize, max_word_length: usize) -> String {
    let mut line = String::new();
    for i in 0..words {
        if i > 0 {
            line.push(' ');
        }
        let mut word = generate_random_string(rng, max_word_length);
        if rng.random_range(0..10) == 0 {
            word = word.to_uppercase();
        }
        line.push_str(&word);
        if rng.random_range(0..8) == 0 {
            line.push_str(TRAILING_PUNCTUATION[rng.random_range(0..TRAILING_PUNCTUATION.len())]);
        }
    }
    line
}

/// Writes a synthetic corpus of `doc_NNNNN.txt` files under `root`
pub fn generate_corpus(
    root: &Path,
    shape: CorpusShape,
    rng: &mut impl Rng,
) -> Result<Vec<PathBuf>> {
    if shape.max_word_length == 0 {
        return Err(WordCountError::configuration(
            "max_word_length must be at least 1",
        ));
    }

    let write_error = |path: &Path, source| WordCountError::Report {
        path: path.to_path_buf(),
        source,
    };
    fs::create_dir_all(root).map_err(|e| write_error(root, e))?;

    let mut files = Vec::with_capacity(shape.num_files);
    for i in 0..shape.num_files {
        let path = root.join(format!("doc_{:05}.txt", i));
        let file = File::create(&path).map_err(|e| write_error(&path, e))?;
        let mut writer = BufWriter::new(file);
        for _ in 0..shape.lines_per_file {
            let line = generate_line(rng, shape.words_per_line, shape.max_word_length);
            writeln!(writer, "{}", line).map_err(|e| write_error(&path, e))?;
        }
        writer.flush().map_err(|e| write_error(&path, e))?;
        files.push(path);
    }

    info!(
        files = files.len(),
        root = %root.display(),
        "generated synthetic corpus"
    );
    Ok(files)
}
