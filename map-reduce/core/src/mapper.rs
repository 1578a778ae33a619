use crate::error::{Result, WordCountError};
use crate::tokenizer::{decode_latin1, NormalizedLine};
use crate::word_table::WordTable;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Word counts and token total for a single file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialResult {
    pub words: WordTable,
    pub total: u64,
}

/// Work assignment for a mapper - one file of the current batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapAssignment {
    /// Position of the file in the batch, used to order partial results
    pub file_index: usize,
    pub path: PathBuf,
}

/// Counts the words of the file at `path`, reading it one line at a time
pub fn map_file(path: &Path) -> Result<PartialResult> {
    let corpus_access = |source| WordCountError::CorpusAccess {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(corpus_access)?;
    map_reader(BufReader::new(file)).map_err(corpus_access)
}

/// Counts the words produced by `reader`; bytes are decoded as Latin-1
pub fn map_reader<R: BufRead>(mut reader: R) -> io::Result<PartialResult> {
    let mut partial = PartialResult::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = NormalizedLine::new(&decode_latin1(&buf));
        for token in line.tokens() {
            partial.words.record(token);
            partial.total += 1;
        }
    }

    Ok(partial)
}
