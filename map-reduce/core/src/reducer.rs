use crate::mapper::PartialResult;
use crate::word_table::WordTable;
use serde::{Deserialize, Serialize};

/// Merged word counts of one coordinator run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub words: WordTable,
    pub total: u64,
}

/// Folds partial results into one aggregate, in the order given
pub fn reduce<I>(partials: I) -> AggregateResult
where
    I: IntoIterator<Item = PartialResult>,
{
    partials
        .into_iter()
        .fold(AggregateResult::default(), |mut aggregate, partial| {
            aggregate.words.merge(partial.words);
            aggregate.total += partial.total;
            aggregate
        })
}
