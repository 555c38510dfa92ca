//! Bounded worker pool for block and row processing

use crate::io::error::{Result, TileError};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Thread pool with `workers` threads (0 picks one per available CPU)
///
/// # Errors
///
/// Returns `WorkerPool` if the operating system refuses to spawn threads
pub fn worker_pool(workers: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("tilegrid-worker-{index}"))
        .build()
        .map_err(|err| TileError::WorkerPool {
            reason: err.to_string(),
        })
}
