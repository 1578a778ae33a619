use serde::{Deserialize, Serialize};
use std::collections::hash_map::{self, HashMap};

/// Occurrence count per normalized word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordTable {
    counts: HashMap<String, u64>,
}

impl WordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `word`
    pub fn record(&mut self, word: &str) {
        match self.counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(word.to_owned(), 1);
            }
        }
    }

    /// Adds `count` occurrences of `word`
    pub fn add(&mut self, word: String, count: u64) {
        *self.counts.entry(word).or_insert(0) += count;
    }

    /// Count for `word`, zero when absent
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts in the table
    pub fn occurrences(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Key-wise sum of `other` into `self`
    pub fn merge(&mut self, other: WordTable) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (word, count) in other.counts {
            self.add(word, count);
        }
    }

    /// The `n` most frequent words, ties broken alphabetically
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        sorted.truncate(n);
        sorted
    }
}

impl IntoIterator for WordTable {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for WordTable {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut table = WordTable::new();
        for (word, count) in iter {
            table.add(word.into(), count);
        }
        table
    }
}
