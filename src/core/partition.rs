use crate::models::worker_assignment::WorkerAssignment;

/// Splits `total_calls` over `worker_count` workers.
///
/// The first `total_calls % worker_count` workers take one extra call, so the
/// quotas sum to `total_calls` and never differ by more than one. Workers past
/// the call count get an empty quota.
pub fn partition(total_calls: u64, worker_count: usize) -> Vec<WorkerAssignment> {
    if worker_count == 0 {
        return Vec::new();
    }
    let workers = worker_count as u64;
    let base = total_calls / workers;
    let remainder = total_calls % workers;
    (0..worker_count)
        .map(|worker_id| WorkerAssignment {
            worker_id,
            calls: base + u64::from((worker_id as u64) < remainder),
        })
        .collect()
}
