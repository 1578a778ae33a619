use async_trait::async_trait;
use std::fmt::Display;
use std::future::Future;

/// A long-running worker body that a runtime can host
#[async_trait]
pub trait WorkerTask: Send + 'static {
    type Output;
    async fn run(self) -> Self::Output;
}

/// Hosts worker loops
pub trait WorkerRuntime<Task>: Send + 'static {
    type Handle: Send;
    type Error: Display + Send;

    fn spawn(task: Task) -> Self::Handle;

    /// Resolves once the worker loop has returned
    fn join(handle: Self::Handle) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
