//! Executor trait for running a batch of independent card renders.
//!
//! The pipeline hands every document to an executor; whether the work runs
//! inline or on a worker pool is decided by the implementation.

use std::fmt::Debug;

/// Runs work items, possibly in parallel.
///
/// Results come back in input order regardless of completion order.
pub trait Executor: Send + Sync + Debug {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    /// Like `execute_all`, for work that can fail per item. One failure
    /// never prevents the remaining items from running.
    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        self.execute_all(items, f)
    }

    /// Maximum number of items in flight at once.
    fn parallelism(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Runs items one after another on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}
