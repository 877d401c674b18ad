//! Execution strategies for the group work of the credential scheme.
//!
//! A [`Dispatcher`] only decides *where* independent, pure computations run.
//! Randomness is never drawn inside a dispatched closure, so both strategies
//! return identical results for the same inputs.

use core::fmt::Debug;
use std::sync::Arc;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::config::SchemeConfig;
use crate::errors::Error;

pub trait Dispatcher: Debug + Send + Sync + Sized + 'static {
    /// Builds the strategy described by `config`.
    fn from_config(config: &SchemeConfig) -> Result<Self, Error>;

    /// Applies `f` to every item, preserving order.
    fn map<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Send + Sync;
}

/// Runs everything on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inline;

impl Dispatcher for Inline {
    fn from_config(_config: &SchemeConfig) -> Result<Self, Error> {
        Ok(Inline)
    }

    fn map<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Send + Sync,
    {
        items.iter().map(f).collect()
    }
}

/// Spreads work over a dedicated rayon pool.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    pool: Arc<ThreadPool>,
}

impl WorkerPool {
    /// `workers = None` lets rayon size the pool.
    pub fn new(workers: Option<usize>) -> Result<Self, Error> {
        if workers == Some(0) {
            return Err(Error::InvalidConfig(
                "worker pool must have at least one thread".into(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.unwrap_or(0))
            .thread_name(|i| format!("coconut-worker-{i}"))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to start worker pool: {e}")))?;
        debug!(threads = pool.current_num_threads(), "worker pool started");
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Dispatcher for WorkerPool {
    fn from_config(config: &SchemeConfig) -> Result<Self, Error> {
        Self::new(config.workers)
    }

    fn map<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Send + Sync,
    {
        self.pool.install(|| items.par_iter().map(f).collect())
    }
}
