//! Pool lifecycle, the worker loop, and the process-wide collaborators
//! (registry + free list) that every pool shares.

pub mod error;
pub mod pool;
pub mod runtime;
pub(crate) mod work_item;

pub use error::PoolError;
pub use pool::{Pool, PoolState, PoolStats};
pub use runtime::{global, Runtime};
