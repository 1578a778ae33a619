use async_trait::async_trait;
use std::pin::Pin;
use tokio::sync::mpsc::{self, Sender};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{self as stream, Stream, StreamExt, StreamMap};
use word_count_core::completion_signaling::CompletionSignaling;
use word_count_core::worker_io::{AsyncCompletionSender, MapReport, WorkerEvent};

/// Yields the worker's report, or None if its token is dropped first
type ReportStream = Pin<Box<dyn Stream<Item = Option<MapReport>> + Send>>;

/// Handed to a mapper with every assignment; carries the report back
#[derive(Clone)]
pub struct ReportSender {
    tx: Sender<MapReport>,
}

#[async_trait]
impl AsyncCompletionSender for ReportSender {
    async fn send(&self, report: MapReport) -> bool {
        self.tx.send(report).await.is_ok()
    }
}

/// One report channel per outstanding assignment, merged through a StreamMap.
///
/// The signaling keeps no sender of its own, so an assignment whose token is
/// dropped unused ends its stream and surfaces as a lost worker.
pub struct ChannelCompletionSignaling {
    reports: StreamMap<usize, ReportStream>,
}

impl CompletionSignaling for ChannelCompletionSignaling {
    type Token = ReportSender;

    fn setup(_num_workers: usize) -> Self {
        Self {
            reports: StreamMap::new(),
        }
    }

    // A worker is only handed a new token once its previous report was read,
    // so replacing its entry never discards a pending report
    fn get_token(&mut self, worker_id: usize) -> Self::Token {
        let (tx, rx) = mpsc::channel(1);
        let reports: ReportStream =
            Box::pin(ReceiverStream::new(rx).map(Some).chain(stream::once(None)));
        self.reports.insert(worker_id, reports);
        ReportSender { tx }
    }

    async fn wait_next(&mut self) -> Option<WorkerEvent> {
        let (worker_id, report) = self.reports.next().await?;
        self.reports.remove(&worker_id);
        Some(match report {
            Some(report) => WorkerEvent::Reported(report),
            None => WorkerEvent::Lost { worker_id },
        })
    }
}
