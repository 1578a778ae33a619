use crate::worker_io::WorkerEvent;
use std::future::Future;

/// How map reports travel from the workers back to the executor
pub trait CompletionSignaling: Send {
    /// The token type passed to workers for reporting completion
    type Token: Clone + Send;

    /// One report route per worker, ids `0..num_workers`
    fn setup(num_workers: usize) -> Self;

    /// Token for `worker_id`'s next assignment
    fn get_token(&mut self, worker_id: usize) -> Self::Token;

    /// Next report, or the loss of a worker whose token was dropped unused.
    /// Returns None once no assignment is outstanding.
    ///
    /// Must be cancel-safe: the executor polls it under a timeout.
    fn wait_next(&mut self) -> impl Future<Output = Option<WorkerEvent>> + Send;
}
