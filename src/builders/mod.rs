//! Fluent construction of a [`crate::core::Pool`] against a
//! [`crate::core::Runtime`].

pub mod pool_builder;

pub use pool_builder::PoolBuilder;
