//! Rayon executor with its own thread pool.
//!
//! The pool is private to the executor, so the number of cards rendered at
//! once is exactly the configured width regardless of what else in the
//! process uses rayon's global pool.

use ogcard_traits::Executor;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Failed to start a render pool of {threads} threads: {source}")]
pub struct ExecutorBuildError {
    pub threads: usize,
    #[source]
    source: rayon::ThreadPoolBuildError,
}

#[derive(Clone)]
pub struct RayonExecutor {
    pool: Arc<ThreadPool>,
    num_threads: usize,
}

impl RayonExecutor {
    /// Starts a pool with `threads` workers (at least one).
    pub fn with_threads(threads: usize) -> Result<Self, ExecutorBuildError> {
        let threads = threads.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ogcard-render-{}", i))
            .build()
            .map_err(|source| ExecutorBuildError { threads, source })?;
        log::debug!("Started render pool with {} threads", threads);
        Ok(Self {
            pool: Arc::new(pool),
            num_threads: threads,
        })
    }
}

impl fmt::Debug for RayonExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RayonExecutor")
            .field("num_threads", &self.num_threads)
            .finish()
    }
}

impl Executor for RayonExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        // Indexed collect keeps input order.
        self.pool.install(|| items.into_par_iter().map(f).collect())
    }

    fn parallelism(&self) -> usize {
        self.num_threads
    }

    fn name(&self) -> &'static str {
        "RayonExecutor"
    }
}
