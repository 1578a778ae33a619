use std::fmt::Display;
use std::future::Future;

/// A pool member that maps one assignment at a time
pub trait Worker: Send {
    type Assignment: Send;
    type Completion;
    type Error: Display;

    fn send_work(&self, assignment: Self::Assignment, complete_tx: Self::Completion);

    /// Close the worker's inbox and wait for it to shut down
    fn wait(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
