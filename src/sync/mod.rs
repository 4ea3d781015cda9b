//! Thin synchronization primitives used as the pool's "primitives layer":
//! mutex, condition variable, and one-time-init wrappers over `parking_lot`.
//!
//! These exist as a stable internal surface (and a public one, for callers
//! who want the same primitives) so the rest of the crate depends on
//! `crate::sync::*` rather than directly on `parking_lot`, keeping the door
//! open to swapping the underlying implementation without touching the
//! pool logic.

pub mod condvar;
pub mod mutex;
pub mod once;

pub use condvar::{Condvar, WaitTimeoutResult};
pub use mutex::{MappedMutexGuard, Mutex, MutexGuard};
pub use once::{Once, OnceCell};
