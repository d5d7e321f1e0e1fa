//! Executors for rendering card batches.
//!
//! - [`RayonExecutor`]: a dedicated pool of fixed width (feature: `rayon`)
//! - [`SyncExecutor`]: inline execution (re-exported from ogcard-traits)

#[cfg(feature = "rayon")]
mod rayon_executor;

#[cfg(feature = "rayon")]
pub use rayon_executor::{ExecutorBuildError, RayonExecutor};

pub use ogcard_traits::{Executor, SyncExecutor};

/// Concrete executor chosen at runtime.
///
/// `Executor` has generic methods and cannot be boxed as `dyn Executor`, so
/// the pipeline holds this enum instead.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    Sync(SyncExecutor),

    #[cfg(feature = "rayon")]
    Rayon(RayonExecutor),
}

impl ExecutorImpl {
    /// A pool `width` wide, or inline execution when `width <= 1` or the
    /// pool cannot be started.
    pub fn with_width(width: usize) -> Self {
        #[cfg(feature = "rayon")]
        {
            if width > 1 {
                match RayonExecutor::with_threads(width) {
                    Ok(exec) => return ExecutorImpl::Rayon(exec),
                    Err(e) => log::warn!("{}; rendering cards sequentially", e),
                }
            }
        }
        #[cfg(not(feature = "rayon"))]
        let _ = width;
        ExecutorImpl::Sync(SyncExecutor::new())
    }
}

impl Executor for ExecutorImpl {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.execute_all(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.execute_all(items, f),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sync(exec) => exec.parallelism(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.parallelism(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sync(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.name(),
        }
    }
}
