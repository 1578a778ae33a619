/// Coordinator side of a worker's inbox
pub trait WorkSender<A, C>: Send + Sync + 'static {
    /// Queues `assignment`; the worker reports through `completion`.
    /// Never blocks the caller.
    fn send_work(&self, assignment: A, completion: C);
}
