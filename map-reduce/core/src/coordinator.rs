use crate::completion_signaling::CompletionSignaling;
use crate::error::{Result, WordCountError};
use crate::executor::Executor;
use crate::mapper::MapAssignment;
use crate::reducer::{self, AggregateResult};
use crate::shutdown_signal::ShutdownSignal;
use crate::worker::Worker;
use crate::worker_factory::WorkerFactory;
use std::future::Future;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Anything that can count the words of a batch of files with a given
/// number of workers
pub trait BatchCounter {
    fn count(
        &mut self,
        files: &[PathBuf],
        num_workers: usize,
    ) -> impl Future<Output = Result<AggregateResult>>;
}

impl<T: BatchCounter> BatchCounter for &mut T {
    fn count(
        &mut self,
        files: &[PathBuf],
        num_workers: usize,
    ) -> impl Future<Output = Result<AggregateResult>> {
        (**self).count(files, num_workers)
    }
}

/// Coordinates one map-reduce word count over a worker pool
/// Generic over worker type, completion signaling, worker factory and
/// shutdown mechanism
pub struct Coordinator<W, CS, F, SD>
where
    W: Worker<Assignment = MapAssignment>,
    CS: CompletionSignaling,
    F: WorkerFactory<W>,
    SD: ShutdownSignal,
{
    worker_factory: F,
    shutdown_signal: SD,
    _phantom: PhantomData<(W, CS)>,
}

impl<W, CS, F, SD> Coordinator<W, CS, F, SD>
where
    W: Worker<Assignment = MapAssignment>,
    CS: CompletionSignaling,
    W::Completion: From<CS::Token>,
    F: WorkerFactory<W>,
    SD: ShutdownSignal,
{
    pub fn new(worker_factory: F, shutdown_signal: SD) -> Self {
        Self {
            worker_factory,
            shutdown_signal,
            _phantom: PhantomData,
        }
    }

    /// Counts the words of `files` with exactly `num_workers` workers.
    ///
    /// The pool is created for this call and torn down before it returns,
    /// whether or not the batch succeeded. Reduction starts only once every
    /// file has produced its partial result.
    pub async fn run(&mut self, files: &[PathBuf], num_workers: usize) -> Result<AggregateResult> {
        if num_workers == 0 {
            return Err(WordCountError::configuration(
                "worker count must be at least 1",
            ));
        }

        info!(
            files = files.len(),
            workers = num_workers,
            "starting word count"
        );

        let workers = self.worker_factory.create_pool(num_workers);

        let assignments = files
            .iter()
            .cloned()
            .enumerate()
            .map(|(file_index, path)| MapAssignment { file_index, path })
            .collect();

        let mut executor = Executor::<W, CS>::new();
        let outcome = executor
            .execute(&workers, assignments, &self.shutdown_signal)
            .await;

        // Tear the pool down before surfacing any error
        for (idx, worker) in workers.into_iter().enumerate() {
            if let Err(e) = worker.wait().await {
                warn!(worker = idx, error = %e, "worker shutdown failed");
            }
        }
        debug!(workers = num_workers, "worker pool shut down");

        let partials = outcome?;
        let aggregate = reducer::reduce(partials);
        info!(
            total = aggregate.total,
            distinct = aggregate.words.len(),
            "word count finished"
        );
        Ok(aggregate)
    }
}

impl<W, CS, F, SD> BatchCounter for Coordinator<W, CS, F, SD>
where
    W: Worker<Assignment = MapAssignment>,
    CS: CompletionSignaling,
    W::Completion: From<CS::Token>,
    F: WorkerFactory<W>,
    SD: ShutdownSignal,
{
    async fn count(&mut self, files: &[PathBuf], num_workers: usize) -> Result<AggregateResult> {
        self.run(files, num_workers).await
    }
}
