/// Polled between reports; once set, no further files are dispatched
pub trait ShutdownSignal: Clone + Send + 'static {
    fn is_cancelled(&self) -> bool;
}
