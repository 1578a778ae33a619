use tokio::task::{self, JoinError, JoinHandle};
use word_count_core::worker_runtime::{WorkerRuntime, WorkerTask};

/// Runs each mapper loop as a tokio task
#[derive(Clone, Copy)]
pub struct TokioRuntime;

impl<T> WorkerRuntime<T> for TokioRuntime
where
    T: WorkerTask<Output = ()> + Send + 'static,
{
    type Handle = JoinHandle<()>;
    type Error = JoinError;

    fn spawn(task: T) -> Self::Handle {
        task::spawn(task.run())
    }

    async fn join(handle: Self::Handle) -> Result<(), Self::Error> {
        handle.await
    }
}
