//! Error types for pool operations.

use thiserror::Error;

/// Errors produced by [`crate::core::Pool`] and [`crate::core::Runtime`] operations.
#[derive(Debug, Error)]
pub enum PoolError {
    /// `submit` was called after `destroy`/`shutdown` began for that pool.
    #[error("pool is shutting down")]
    Shutdown,

    /// The pending queue is at its configured capacity.
    #[error("pending queue is at capacity")]
    Backpressure,

    /// Allocation failed. Not reachable through the infallible `Box::new` path
    /// used today; kept for API parity with the source and for a future
    /// fallible-allocation surface.
    #[error("allocation failed")]
    Alloc,

    /// Initialization of a synchronization primitive failed. `parking_lot`
    /// primitives are infallible to construct, so this is unreachable today;
    /// kept for parity and in case the primitive layer is ever swapped.
    #[error("primitive initialization failed: {0}")]
    Primitive(String),

    /// OS thread creation failed and no existing worker could service the
    /// work item that triggered the spawn attempt.
    #[error("thread creation failed: {0}")]
    Thread(#[source] std::io::Error),

    /// `destroy` was called on a pool no longer present in the registry.
    #[error("pool is not registered with this runtime")]
    Unknown,

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
