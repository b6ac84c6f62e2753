//! Bounded parallel processing

use crate::error::{BenchError, Result};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Thread pool with exactly `jobs` workers
pub fn build_pool(jobs: usize) -> Result<ThreadPool> {
    if jobs == 0 {
        return Err(BenchError::ParallelExecution {
            message: "Worker count must be at least 1".to_string(),
        });
    }
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|index| format!("vibebench-worker-{}", index))
        .build()?)
}

/// Execute a function in parallel on a collection of items, inside `pool`,
/// reporting each completion. Results keep the input order.
pub fn parallel_process_with_progress<T, F, R, P>(
    pool: &ThreadPool,
    items: Vec<T>,
    f: F,
    progress_callback: P,
) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
    P: Fn(ProgressUpdate, &T) + Send + Sync,
{
    let total = items.len();
    let counter = AtomicUsize::new(0);

    pool.install(|| {
        items
            .into_par_iter()
            .map(|item| {
                let result = f(&item);
                let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                progress_callback(
                    ProgressUpdate::new(done, total, format!("Processed {}/{}", done, total)),
                    &item,
                );
                result
            })
            .collect()
    })
}
