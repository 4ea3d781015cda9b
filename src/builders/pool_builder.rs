//! Construct a [`Pool`] against a [`Runtime`], either by chaining setters or
//! from a [`PoolConfig`].

use std::sync::Arc;
use std::time::Duration;

use crate::config::PoolConfig;
use crate::core::error::PoolError;
use crate::core::pool::Pool;
use crate::core::runtime::Runtime;

/// Fluent constructor for a [`Pool`].
///
/// Borrows the [`Runtime`] it will register the pool with; the pool itself
/// is handed out as an owned `Arc` once built, independent of the builder's
/// lifetime.
pub struct PoolBuilder<'a> {
    runtime: &'a Runtime,
    name: String,
    max_threads: usize,
    max_pending: usize,
    keepalive: Option<Duration>,
    eager_first_worker: bool,
}

impl<'a> PoolBuilder<'a> {
    /// Start building a pool against `runtime`, unbounded threads and
    /// pending queue, no keepalive, lazy first-worker spawn.
    pub fn new(runtime: &'a Runtime) -> Self {
        Self {
            runtime,
            name: "pool".to_string(),
            max_threads: 0,
            max_pending: 0,
            keepalive: None,
            eager_first_worker: false,
        }
    }

    /// Start building a pool from a [`PoolConfig`], validating it first.
    pub fn from_config(runtime: &'a Runtime, config: &PoolConfig) -> Result<Self, PoolError> {
        config
            .validate()
            .map_err(PoolError::InvalidConfig)?;
        Ok(Self {
            runtime,
            name: config.name.clone(),
            max_threads: config.max_threads,
            max_pending: config.max_pending,
            keepalive: config.keepalive,
            eager_first_worker: config.eager_first_worker,
        })
    }

    /// Worker thread name prefix. Defaults to `"pool"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Maximum worker threads. `0` means unbounded (the default).
    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = n;
        self
    }

    /// Size `max_threads` to the number of logical CPUs, a reasonable
    /// default for CPU-bound work when no other bound is known.
    pub fn max_threads_auto(mut self) -> Self {
        self.max_threads = num_cpus::get();
        self
    }

    /// Maximum queued pending items. `0` means unbounded (the default).
    pub fn max_pending(mut self, n: usize) -> Self {
        self.max_pending = n;
        self
    }

    /// Reap idle surplus workers after `timeout` of no work. Off by default.
    pub fn keepalive(mut self, timeout: Duration) -> Self {
        self.keepalive = Some(timeout);
        self
    }

    /// Spawn the first worker immediately in [`Self::build`] instead of
    /// lazily on the first `submit`.
    pub fn eager_first_worker(mut self, eager: bool) -> Self {
        self.eager_first_worker = eager;
        self
    }

    /// Construct the pool, register it with the runtime, and return the
    /// handle.
    ///
    /// Only fails if eager first-worker spawn is requested and the OS
    /// refuses to create the thread.
    pub fn build(self) -> Result<Arc<Pool>, PoolError> {
        let free_list = self.runtime.free_list_handle();
        let pool = Pool::new(
            self.name,
            self.max_threads,
            self.max_pending,
            self.keepalive,
            free_list,
        );

        if self.eager_first_worker {
            pool.spawn_worker()?;
        }

        self.runtime.register(Arc::clone(&pool));
        Ok(pool)
    }
}
