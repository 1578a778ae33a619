/// Builds the mappers of one batch
pub trait WorkerFactory<W>: Send {
    fn create_worker(&mut self, worker_id: usize) -> W;

    /// Workers numbered `0..size`; the id doubles as the report routing key
    fn create_pool(&mut self, size: usize) -> Vec<W> {
        (0..size).map(|worker_id| self.create_worker(worker_id)).collect()
    }
}

impl<F, W> WorkerFactory<W> for F
where
    F: FnMut(usize) -> W + Send,
{
    fn create_worker(&mut self, worker_id: usize) -> W {
        self(worker_id)
    }
}
