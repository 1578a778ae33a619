use crate::completion_signaling::CompletionSignaling;
use crate::error::{Result, WordCountError};
use crate::mapper::{MapAssignment, PartialResult};
use crate::shutdown_signal::ShutdownSignal;
use crate::worker::Worker;
use crate::worker_io::WorkerEvent;
use std::marker::PhantomData;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, warn};

/// How often the dispatch loop wakes up to look at the shutdown signal
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Map phase executor
/// Hands one assignment to each idle worker until the batch is exhausted,
/// collecting one partial result per file
pub struct Executor<W, CS>
where
    W: Worker<Assignment = MapAssignment>,
    CS: CompletionSignaling,
{
    _phantom: PhantomData<(W, CS)>,
}

impl<W, CS> Default for Executor<W, CS>
where
    W: Worker<Assignment = MapAssignment>,
    CS: CompletionSignaling,
    W::Completion: From<CS::Token>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W, CS> Executor<W, CS>
where
    W: Worker<Assignment = MapAssignment>,
    CS: CompletionSignaling,
    W::Completion: From<CS::Token>,
{
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    /// Maps every assignment on `workers` and returns the partial results in
    /// assignment order. On the first failure dispatch stops, in-flight work
    /// is drained and the failure is returned.
    pub async fn execute<SD>(
        &mut self,
        workers: &[W],
        assignments: Vec<MapAssignment>,
        shutdown_signal: &SD,
    ) -> Result<Vec<PartialResult>>
    where
        SD: ShutdownSignal,
    {
        if assignments.is_empty() {
            return Ok(Vec::new());
        }
        if workers.is_empty() {
            return Err(WordCountError::configuration(
                "cannot execute a batch without workers",
            ));
        }

        let mut signaling = CS::setup(workers.len());
        let mut slots: Vec<Option<PartialResult>> = vec![None; assignments.len()];
        let mut file_owner = vec![0; assignments.len()];
        let mut in_flight: Vec<Option<usize>> = vec![None; workers.len()];
        let mut pending = assignments.into_iter();
        let mut active_workers = 0;
        let mut failure: Option<WordCountError> = None;

        // Distribute initial assignments
        for (worker_id, worker) in workers.iter().enumerate() {
            let Some(assignment) = pending.next() else {
                break;
            };
            file_owner[assignment.file_index] = worker_id;
            in_flight[worker_id] = Some(assignment.file_index);
            worker.send_work(assignment, signaling.get_token(worker_id).into());
            active_workers += 1;
        }
        debug!(active_workers, "initial assignments dispatched");

        // Collect reports, handing the next file to whichever worker went idle
        while active_workers > 0 {
            let report = match time::timeout(SHUTDOWN_POLL_INTERVAL, signaling.wait_next()).await
            {
                Ok(Some(WorkerEvent::Reported(report))) => report,
                Ok(Some(WorkerEvent::Lost { worker_id })) => {
                    active_workers -= 1;
                    in_flight[worker_id] = None;
                    error!(worker = worker_id, "worker lost with an assignment in flight");
                    if failure.is_none() {
                        failure = Some(WordCountError::WorkerLost { worker_id });
                    }
                    continue;
                }
                Ok(None) => {
                    let worker_id = in_flight.iter().position(Option::is_some).unwrap_or(0);
                    error!(
                        active_workers,
                        worker = worker_id,
                        "completion signaling closed with work in flight"
                    );
                    if failure.is_none() {
                        failure = Some(WordCountError::WorkerLost { worker_id });
                    }
                    break;
                }
                Err(_) => {
                    if failure.is_none() && shutdown_signal.is_cancelled() {
                        warn!("shutdown requested, draining in-flight assignments");
                        failure = Some(WordCountError::Cancelled);
                    }
                    continue;
                }
            };
            active_workers -= 1;
            in_flight[report.worker_id] = None;

            match report.outcome {
                Ok(partial) => slots[report.file_index] = Some(partial),
                Err(e) => {
                    if failure.is_none() {
                        error!(
                            worker = report.worker_id,
                            error = %e,
                            "map assignment failed, stopping dispatch"
                        );
                        failure = Some(e);
                    } else {
                        debug!(
                            worker = report.worker_id,
                            error = %e,
                            "additional failure while draining"
                        );
                    }
                }
            }

            if failure.is_none() && shutdown_signal.is_cancelled() {
                warn!("shutdown requested, draining in-flight assignments");
                failure = Some(WordCountError::Cancelled);
            }
            if failure.is_some() {
                continue;
            }

            if let Some(assignment) = pending.next() {
                file_owner[assignment.file_index] = report.worker_id;
                in_flight[report.worker_id] = Some(assignment.file_index);
                workers[report.worker_id]
                    .send_work(assignment, signaling.get_token(report.worker_id).into());
                active_workers += 1;
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(file_index, slot)| {
                slot.ok_or(WordCountError::WorkerLost {
                    worker_id: file_owner[file_index],
                })
            })
            .collect()
    }
}
