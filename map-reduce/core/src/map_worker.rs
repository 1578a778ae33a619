use crate::error::{Result, WordCountError};
use crate::mapper::{self, MapAssignment, PartialResult};
use crate::work_sender::WorkSender;
use crate::worker::Worker;
use crate::worker_io::{AsyncCompletionSender, AsyncWorkReceiver, MapReport};
use crate::worker_runtime::{WorkerRuntime, WorkerTask};
use async_trait::async_trait;
use std::marker::PhantomData;
use tokio::task;
use tracing::{debug, trace, warn};

/// Body of a map worker: maps one assignment at a time until its inbox closes
pub struct MapWorkerTask<WR, CS> {
    pub id: usize,
    pub work_rx: WR,
    _phantom: PhantomData<CS>,
}

impl<WR, CS> MapWorkerTask<WR, CS> {
    pub fn new(id: usize, work_rx: WR) -> Self {
        Self {
            id,
            work_rx,
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<WR, CS> WorkerTask for MapWorkerTask<WR, CS>
where
    WR: AsyncWorkReceiver<MapAssignment, CS> + 'static,
    CS: AsyncCompletionSender + 'static,
{
    type Output = ();

    async fn run(mut self) -> Self::Output {
        debug!(worker = self.id, "map worker started");

        while let Some((assignment, completion_sender)) = self.work_rx.recv().await {
            trace!(
                worker = self.id,
                file = %assignment.path.display(),
                "mapping file"
            );

            let file_index = assignment.file_index;
            let outcome = run_blocking_map(assignment).await;
            let report = MapReport {
                worker_id: self.id,
                file_index,
                outcome,
            };

            if !completion_sender.send(report).await {
                warn!(worker = self.id, "coordinator dropped the completion channel");
            }
        }

        debug!(worker = self.id, "map worker inbox closed, exiting");
    }
}

/// Runs the mapper on the blocking pool so file I/O never stalls the scheduler
async fn run_blocking_map(assignment: MapAssignment) -> Result<PartialResult> {
    let path = assignment.path.clone();
    match task::spawn_blocking(move || mapper::map_file(&assignment.path)).await {
        Ok(outcome) => outcome,
        Err(join_error) => Err(WordCountError::WorkerPanicked {
            path,
            reason: join_error.to_string(),
        }),
    }
}

/// Map worker handle held by the coordinator
/// Generic over work sender, runtime, work receiver and completion sender
pub struct MapWorker<WS, R, WR, CS>
where
    WS: WorkSender<MapAssignment, CS>,
    R: WorkerRuntime<MapWorkerTask<WR, CS>>,
{
    work_sender: WS,
    task_handle: R::Handle,
    _phantom: PhantomData<(WR, CS)>,
}

impl<WS, R, WR, CS> MapWorker<WS, R, WR, CS>
where
    WS: WorkSender<MapAssignment, CS>,
    R: WorkerRuntime<MapWorkerTask<WR, CS>>,
    WR: AsyncWorkReceiver<MapAssignment, CS> + 'static,
    CS: AsyncCompletionSender + 'static,
{
    pub fn new(id: usize, work_sender: WS, work_rx: WR) -> Self {
        let task_handle = R::spawn(MapWorkerTask::new(id, work_rx));

        Self {
            work_sender,
            task_handle,
            _phantom: PhantomData,
        }
    }

    /// Closes the inbox and waits for the worker to finish its current file
    pub async fn wait(self) -> std::result::Result<(), R::Error> {
        drop(self.work_sender);
        R::join(self.task_handle).await
    }
}

impl<WS, R, WR, CS> Worker for MapWorker<WS, R, WR, CS>
where
    WS: WorkSender<MapAssignment, CS>,
    R: WorkerRuntime<MapWorkerTask<WR, CS>>,
    WR: AsyncWorkReceiver<MapAssignment, CS> + 'static,
    CS: AsyncCompletionSender + 'static,
{
    type Assignment = MapAssignment;
    type Completion = CS;
    type Error = R::Error;

    fn send_work(&self, assignment: Self::Assignment, complete_tx: Self::Completion) {
        self.work_sender.send_work(assignment, complete_tx);
    }

    async fn wait(self) -> std::result::Result<(), Self::Error> {
        MapWorker::wait(self).await
    }
}
