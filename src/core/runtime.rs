//! Process-wide collaborators shared by every pool: the registry of live
//! pools and the free list of recyclable work items.

use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::core::error::PoolError;
use crate::core::pool::Pool;
use crate::core::work_item::WorkItem;
use crate::sync::Mutex;

/// Owns the pool registry and the shared work-item free list.
///
/// Mirrors the source's hidden process statics (`ldap_int_thread_pool_list`,
/// `ldap_int_ctx_free_list`) but as an explicit value instead of a global:
/// construct one with [`Runtime::new`] and thread it through
/// [`crate::builders::PoolBuilder`], or reach for [`global`] when ambient
/// process-wide state is what you actually want.
pub struct Runtime {
    pools: Mutex<Vec<Arc<Pool>>>,
    free_list: Arc<Mutex<Vec<Box<WorkItem>>>>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Construct an empty runtime: no pools registered, no recycled work items.
    pub fn new() -> Self {
        Self {
            pools: Mutex::new(Vec::new()),
            free_list: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The shared free-list handle new pools built against this runtime
    /// should clone. Crate-private: pools join the free list only through
    /// [`crate::builders::PoolBuilder`].
    pub(crate) fn free_list_handle(&self) -> Arc<Mutex<Vec<Box<WorkItem>>>> {
        Arc::clone(&self.free_list)
    }

    pub(crate) fn register(&self, pool: Arc<Pool>) {
        self.pools.lock().push(pool);
    }

    /// Remove `pool` from the registry, transition it through the requested
    /// shutdown mode, and wait for every one of its workers to exit.
    ///
    /// `run_pending = true` lets already-queued items run to completion
    /// before returning; `run_pending = false` discards them, finishing
    /// only the items already in flight.
    pub fn destroy(&self, pool: &Arc<Pool>, run_pending: bool) -> Result<(), PoolError> {
        let removed = {
            let mut pools = self.pools.lock();
            let before = pools.len();
            pools.retain(|p| !Arc::ptr_eq(p, pool));
            pools.len() != before
        };
        if !removed {
            return Err(PoolError::Unknown);
        }
        pool.shutdown_and_wait(run_pending);
        Ok(())
    }

    /// Destroy every pool still registered, discarding queued (not
    /// in-flight) work, then drop the free list's recycled items.
    ///
    /// Idempotent: calling this on an already-drained runtime is a no-op.
    pub fn shutdown(&self) {
        let pools: Vec<Arc<Pool>> = self.pools.lock().drain(..).collect();
        let count = pools.len();
        for pool in &pools {
            pool.shutdown_and_wait(false);
        }
        let recycled = self.free_list.lock().drain(..).count();
        info!(pools = count, recycled_items = recycled, "runtime shut down");
    }

    /// Number of pools currently registered. Exposed for tests and diagnostics.
    pub fn pool_count(&self) -> usize {
        self.pools.lock().len()
    }
}

static GLOBAL: OnceLock<Runtime> = OnceLock::new();

/// The lazily-initialized, process-wide default [`Runtime`].
///
/// Mirrors the source's `ldap_int_thread_pool_startup`/`_shutdown` ambient
/// singleton for callers who don't want to thread an explicit `Runtime`
/// through their call graph. First access initializes it; there is no
/// explicit `startup()` to call beforehand.
pub fn global() -> &'static Runtime {
    GLOBAL.get_or_init(|| {
        debug!("initializing process-wide default runtime");
        Runtime::new()
    })
}
