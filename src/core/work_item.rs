//! The recyclable unit of submitted work.

/// A boxed closure plus the slot that carries it through the pending queue
/// and the free list.
///
/// A `WorkItem` lives on exactly one of two owning collections at a time:
/// a pool's pending `VecDeque`, or the runtime's free list `Vec`. Rust's
/// ownership model makes the source's parallel link-pointer trick
/// unnecessary — membership is structural rather than pointer-based.
pub(crate) struct WorkItem {
    job: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl WorkItem {
    /// A freshly allocated, empty slot.
    pub(crate) fn new() -> Self {
        Self { job: None }
    }

    /// Install a job into this slot, overwriting whatever was there.
    pub(crate) fn fill<F>(&mut self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.job = Some(Box::new(job));
    }

    /// Take the job out, leaving the slot empty for recycling.
    pub(crate) fn take(&mut self) -> Option<Box<dyn FnOnce() + Send + 'static>> {
        self.job.take()
    }
}
