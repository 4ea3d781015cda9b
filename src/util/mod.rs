//! Ambient helpers that aren't part of the pool's core logic.

pub mod telemetry;

pub use telemetry::init_tracing;
