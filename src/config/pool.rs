//! Declarative configuration for a [`crate::core::Pool`], as an alternative
//! to chaining [`crate::builders::PoolBuilder`] calls by hand.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Serializable pool configuration.
///
/// `max_threads` and `max_pending` follow the `0` means unbounded
/// convention used throughout the crate (see the design note on the
/// `usize` width translation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Pool name, used as the worker thread name prefix.
    pub name: String,
    /// Maximum number of worker threads. `0` means unbounded.
    pub max_threads: usize,
    /// Maximum number of queued (not yet running) items. `0` means unbounded.
    pub max_pending: usize,
    /// Idle-timeout before a surplus worker is reaped. `None` disables
    /// reaping, matching the pool's default behavior.
    #[serde(default, with = "keepalive_secs")]
    pub keepalive: Option<Duration>,
    /// Spawn the first worker eagerly in [`crate::builders::PoolBuilder::build`]
    /// rather than lazily on the first `submit`.
    #[serde(default)]
    pub eager_first_worker: bool,
}

impl PoolConfig {
    /// A pool configuration with an unbounded thread count and pending
    /// queue, no keepalive, and lazy first-worker spawn.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_threads: 0,
            max_pending: 0,
            keepalive: None,
            eager_first_worker: false,
        }
    }

    /// Reject configurations that could never produce a useful pool.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".into());
        }
        if let Some(keepalive) = self.keepalive {
            if keepalive.is_zero() {
                return Err("keepalive must be greater than zero, or None to disable".into());
            }
        }
        Ok(())
    }
}

mod keepalive_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(|d| d.as_secs_f64()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs: Option<f64> = Option::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs_f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        let cfg = PoolConfig::new("");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn accepts_single_threaded_unbounded_pool() {
        // pool_init(1, 0) is a valid, canonical configuration.
        let mut cfg = PoolConfig::new("lonely");
        cfg.max_threads = 1;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn round_trips_through_json() {
        let mut cfg = PoolConfig::new("workers");
        cfg.max_threads = 8;
        cfg.max_pending = 256;
        cfg.keepalive = Some(Duration::from_millis(1500));

        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: PoolConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.name, cfg.name);
        assert_eq!(back.max_threads, cfg.max_threads);
        assert_eq!(back.keepalive, cfg.keepalive);
    }
}
