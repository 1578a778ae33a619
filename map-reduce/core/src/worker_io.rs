use crate::error::Result;
use crate::mapper::PartialResult;
use async_trait::async_trait;

/// Outcome of one assignment, sent from a worker back to the coordinator
#[derive(Debug)]
pub struct MapReport {
    pub worker_id: usize,
    pub file_index: usize,
    pub outcome: Result<PartialResult>,
}

/// What the executor hears about an in-flight assignment
#[derive(Debug)]
pub enum WorkerEvent {
    Reported(MapReport),
    /// The worker dropped its completion token without reporting
    Lost { worker_id: usize },
}

/// Worker side of the inbox
#[async_trait]
pub trait AsyncWorkReceiver<A, C>: Send {
    /// None once the coordinator has dropped its sender
    async fn recv(&mut self) -> Option<(A, C)>;
}

#[async_trait]
pub trait AsyncCompletionSender: Send + Clone + Sync {
    /// False if the executor is no longer listening
    async fn send(&self, report: MapReport) -> bool;
}
