//! Pool instance: per-pool state, the submit path, the worker loop, and
//! the two shutdown modes.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::core::error::PoolError;
use crate::core::work_item::WorkItem;
use crate::sync::{Condvar, Mutex};

/// Lifecycle state of a [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Accepting submissions; workers dequeue and run them.
    Running,
    /// No longer accepting submissions; already-queued items still run to
    /// completion before workers exit.
    Finishing,
    /// No longer accepting submissions; queued items are discarded, only
    /// in-flight items finish.
    Stopping,
}

/// Point-in-time counters for observability. See [`Pool::stats`].
#[derive(Debug, Clone, Copy)]
pub struct PoolStats {
    /// Current lifecycle state.
    pub state: PoolState,
    /// Worker threads spawned and not yet exited.
    pub open_count: usize,
    /// Workers currently executing a job.
    pub active_count: usize,
    /// Items waiting in the pending queue.
    pub pending_count: usize,
    /// Workers whose spawn has been initiated but not yet observed running.
    pub starting: usize,
}

struct PoolInner {
    state: PoolState,
    max_threads: usize,
    max_pending: usize,
    pending: VecDeque<Box<WorkItem>>,
    pending_count: usize,
    active_count: usize,
    open_count: usize,
    starting: usize,
}

impl PoolInner {
    /// `pending_count == pending.len()` must hold at every observation point
    /// that isn't mid-transition; debug builds check it rather than trust it.
    fn debug_check_invariants(&self) {
        debug_assert_eq!(self.pending_count, self.pending.len());
        debug_assert!(self.active_count <= self.open_count);
        debug_assert!(self.starting <= self.open_count);
    }
}

/// A bounded worker thread pool.
///
/// Built through [`crate::builders::PoolBuilder`], never constructed
/// directly. Cheap to clone via `Arc` (that's the only way it's handed
/// out): every `submit` and worker thread holds its own `Arc<Pool>`.
pub struct Pool {
    name: String,
    inner: Mutex<PoolInner>,
    cond: Condvar,
    free_list: Arc<Mutex<Vec<Box<WorkItem>>>>,
    keepalive: Option<Duration>,
    worker_seq: AtomicUsize,
}

impl Pool {
    pub(crate) fn new(
        name: String,
        max_threads: usize,
        max_pending: usize,
        keepalive: Option<Duration>,
        free_list: Arc<Mutex<Vec<Box<WorkItem>>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            inner: Mutex::new(PoolInner {
                state: PoolState::Running,
                max_threads,
                max_pending,
                pending: VecDeque::new(),
                pending_count: 0,
                active_count: 0,
                open_count: 0,
                starting: 0,
            }),
            cond: Condvar::new(),
            free_list,
            keepalive,
            worker_seq: AtomicUsize::new(0),
        })
    }

    /// The pool's name, as given to [`crate::builders::PoolBuilder::name`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submit a job for execution by some worker thread.
    ///
    /// Returns as soon as the job is enqueued; it does not wait for the job
    /// to run. See §4.2 of the design for the full admission and
    /// worker-spawn decision.
    pub fn submit<F>(self: &Arc<Self>, job: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut guard = self.inner.lock();

        if guard.state != PoolState::Running {
            return Err(PoolError::Shutdown);
        }
        if guard.max_pending > 0 && guard.pending_count >= guard.max_pending {
            return Err(PoolError::Backpressure);
        }

        let mut item = self
            .free_list
            .lock()
            .pop()
            .unwrap_or_else(|| Box::new(WorkItem::new()));
        item.fill(job);
        let item_ptr: *const WorkItem = item.as_ref();

        guard.pending.push_back(item);
        guard.pending_count += 1;
        guard.debug_check_invariants();
        self.cond.notify_one();

        let should_spawn = (guard.open_count == 0
            || guard.pending_count > 1
            || guard.open_count == guard.active_count)
            && (guard.max_threads == 0 || guard.open_count < guard.max_threads);

        if !should_spawn {
            return Ok(());
        }

        guard.open_count += 1;
        guard.starting += 1;
        drop(guard);

        let pool = Arc::clone(self);
        let worker_id = self.worker_seq.fetch_add(1, Ordering::Relaxed);
        let spawn_result = thread::Builder::new()
            .name(format!("{}-worker-{worker_id}", self.name))
            .spawn(move || worker_main(pool));

        let mut guard = self.inner.lock();
        match spawn_result {
            Ok(_handle) => {
                guard.starting -= 1;
            }
            Err(err) => {
                guard.open_count -= 1;
                guard.starting -= 1;
                if guard.open_count == 0 {
                    let pos = guard
                        .pending
                        .iter()
                        .position(|i| std::ptr::eq(i.as_ref(), item_ptr));
                    if let Some(mut rolled_back) = pos.and_then(|pos| guard.pending.remove(pos)) {
                        guard.pending_count -= 1;
                        guard.debug_check_invariants();
                        drop(guard);
                        rolled_back.take();
                        self.free_list.lock().push(rolled_back);
                        error!(pool = %self.name, error = %err, "thread creation failed with no worker to service item");
                        return Err(PoolError::Thread(err));
                    }
                }
                // Another worker exists (or will), so this item will still
                // be serviced. Thread-creation failure is tolerated.
                warn!(pool = %self.name, error = %err, "thread creation failed, existing worker will cover the queue");
            }
        }

        Ok(())
    }

    /// Spawn a worker unconditionally, outside the usual submit-driven
    /// growth decision. Used by [`crate::builders::PoolBuilder::eager_first_worker`]
    /// to pre-warm a pool before any job is submitted.
    pub(crate) fn spawn_worker(self: &Arc<Self>) -> Result<(), PoolError> {
        let mut guard = self.inner.lock();
        guard.open_count += 1;
        guard.starting += 1;
        drop(guard);

        let pool = Arc::clone(self);
        let worker_id = self.worker_seq.fetch_add(1, Ordering::Relaxed);
        let spawn_result = thread::Builder::new()
            .name(format!("{}-worker-{worker_id}", self.name))
            .spawn(move || worker_main(pool));

        let mut guard = self.inner.lock();
        match spawn_result {
            Ok(_handle) => {
                guard.starting -= 1;
                Ok(())
            }
            Err(err) => {
                guard.open_count -= 1;
                guard.starting -= 1;
                Err(PoolError::Thread(err))
            }
        }
    }

    /// Update the maximum worker count. Surplus workers notice and exit on
    /// their next loop iteration; this call never kills a running worker
    /// mid-job.
    pub fn set_max_threads(&self, n: usize) {
        let mut guard = self.inner.lock();
        guard.max_threads = n;
        debug!(pool = %self.name, max_threads = n, "max_threads updated");
        // Workers blocked in `wait` need a nudge to re-check the new bound.
        drop(guard);
        self.cond.notify_all();
    }

    /// `pending_count + active_count` at the instant of the call. No
    /// guarantees hold once the lock is released.
    pub fn backload(&self) -> usize {
        let guard = self.inner.lock();
        guard.pending_count + guard.active_count
    }

    /// A snapshot of the pool's counters, for diagnostics and tests.
    pub fn stats(&self) -> PoolStats {
        let guard = self.inner.lock();
        PoolStats {
            state: guard.state,
            open_count: guard.open_count,
            active_count: guard.active_count,
            pending_count: guard.pending_count,
            starting: guard.starting,
        }
    }

    /// Transition to a shutdown state, wake every open worker, and busy-wait
    /// until all of them have exited. Called by
    /// [`crate::core::Runtime::destroy`] and [`crate::core::Runtime::shutdown`];
    /// not part of the public API directly so the registry bookkeeping
    /// (removing the pool so no new `submit` caller can find it) always
    /// happens first.
    pub(crate) fn shutdown_and_wait(&self, run_pending: bool) {
        let waiting = {
            let mut guard = self.inner.lock();
            guard.state = if run_pending {
                PoolState::Finishing
            } else {
                PoolState::Stopping
            };
            guard.open_count
        };

        for _ in 0..waiting {
            self.cond.notify_one();
        }

        loop {
            let open = self.inner.lock().open_count;
            if open == 0 {
                break;
            }
            thread::yield_now();
        }

        let mut guard = self.inner.lock();
        let discarded = guard.pending.len();
        if discarded > 0 {
            warn!(pool = %self.name, discarded, "discarding queued items on stop-now shutdown");
        }
        let leftover: Vec<Box<WorkItem>> = guard.pending.drain(..).collect();
        guard.pending_count = 0;
        drop(guard);

        let mut free_list = self.free_list.lock();
        for mut item in leftover {
            item.take();
            free_list.push(item);
        }

        info!(pool = %self.name, "pool drained");
    }
}

fn worker_main(pool: Arc<Pool>) {
    let mut guard = pool.inner.lock();
    debug!(pool = %pool.name, "worker started");

    while guard.state != PoolState::Stopping {
        if let Some(mut item) = guard.pending.pop_front() {
            guard.pending_count -= 1;
            guard.active_count += 1;
            guard.debug_check_invariants();
            drop(guard);

            if let Some(job) = item.take() {
                if let Err(panic) = catch_unwind(AssertUnwindSafe(job)) {
                    error!(pool = %pool.name, panic = %panic_message(&panic), "job panicked; worker continues");
                }
            }
            pool.free_list.lock().push(item);

            guard = pool.inner.lock();
            guard.active_count -= 1;
            guard.debug_check_invariants();
            continue;
        }

        if guard.state == PoolState::Finishing {
            break;
        }
        if guard.max_threads > 0 && guard.open_count > guard.max_threads {
            debug!(pool = %pool.name, "max_threads lowered, worker exiting");
            break;
        }
        if guard.state == PoolState::Running {
            match pool.keepalive {
                Some(timeout) => {
                    let result = pool.cond.wait_for(&mut guard, timeout);
                    if result.timed_out() && guard.open_count > 1 && guard.starting == 0 {
                        debug!(pool = %pool.name, "idle timeout elapsed, worker reaped");
                        break;
                    }
                }
                None => pool.cond.wait(&mut guard),
            }
        }
    }

    guard.open_count -= 1;
    drop(guard);
    debug!(pool = %pool.name, "worker exiting");
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
