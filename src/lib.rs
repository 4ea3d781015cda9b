//! # tpool
//!
//! A bounded worker thread pool: a fixed-size (or dynamically-bounded)
//! set of OS threads draining a FIFO queue of submitted closures, growing
//! lazily under load and shrinking back down when idle.
//!
//! ## Quick example
//!
//! ```rust
//! use tpool_rs::builders::PoolBuilder;
//! use tpool_rs::core::Runtime;
//!
//! let runtime = Runtime::new();
//! let pool = PoolBuilder::new(&runtime)
//!     .name("workers")
//!     .max_threads(4)
//!     .build()
//!     .expect("build pool");
//!
//! pool.submit(|| {
//!     println!("hello from a worker");
//! })
//! .expect("submit");
//!
//! runtime.destroy(&pool, true).expect("destroy");
//! ```
//!
//! Reach for [`core::global`] instead of an explicit [`core::Runtime`] when
//! ambient, process-wide pool registration is what you want.
//!
//! For complete examples, see `tests/pool_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Pool lifecycle, the worker loop, and process-wide collaborators.
pub mod core;
/// Declarative pool configuration.
pub mod config;
/// Fluent pool construction.
pub mod builders;
/// Synchronization primitives (mutex, condvar, once) built on `parking_lot`.
pub mod sync;
/// Ambient helpers not part of the pool's core logic.
pub mod util;

pub use config::PoolConfig;
pub use core::{Pool, PoolError, PoolState, PoolStats, Runtime};
pub use builders::PoolBuilder;
pub use sync::{Condvar, Mutex, MutexGuard, Once, OnceCell};
