//! Declarative pool configuration, as an alternative to the
//! [`crate::builders::PoolBuilder`] chain.

pub mod pool;

pub use pool::PoolConfig;
