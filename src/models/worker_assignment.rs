/// One worker's share of the call budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerAssignment {
    pub worker_id: usize,
    pub calls: u64,
}
