use async_trait::async_trait;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task;
use tracing::warn;
use word_count_core::work_sender::WorkSender;
use word_count_core::worker_io::AsyncWorkReceiver;

/// Opens a bounded assignment queue between the coordinator and one mapper
pub fn work_channel<A, C>(buffer: usize) -> (ChannelWorkSender<A, C>, ChannelWorkReceiver<A, C>) {
    let (tx, rx) = mpsc::channel(buffer);
    (ChannelWorkSender { tx }, ChannelWorkReceiver { rx })
}

/// Coordinator end of a mapper's assignment queue
pub struct ChannelWorkSender<A, C> {
    tx: Sender<(A, C)>,
}

impl<A, C> WorkSender<A, C> for ChannelWorkSender<A, C>
where
    A: Send + 'static,
    C: Send + 'static,
{
    // Dispatch must not block the collection loop, so the send is detached.
    // On a closed queue the completion token is dropped with the assignment,
    // which the executor sees as a lost worker.
    fn send_work(&self, assignment: A, completion: C) {
        let tx = self.tx.clone();
        task::spawn(async move {
            if tx.send((assignment, completion)).await.is_err() {
                warn!("worker inbox closed, assignment dropped");
            }
        });
    }
}

/// Mapper end of the assignment queue
pub struct ChannelWorkReceiver<A, C> {
    rx: Receiver<(A, C)>,
}

#[async_trait]
impl<A, C> AsyncWorkReceiver<A, C> for ChannelWorkReceiver<A, C>
where
    A: Send,
    C: Send,
{
    async fn recv(&mut self) -> Option<(A, C)> {
        self.rx.recv().await
    }
}
