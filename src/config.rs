//! # Global pool configuration.
//!
//! Provides [`PoolConfig`], the centralized settings for the supervisor
//! runtime, and [`RuntimeDefaults`]/[`RuntimeConfig`], the pool-wide worker
//! configuration template and its per-slot instantiation.
//!
//! Config is used in two ways:
//! 1. **Supervisor creation**: `SupervisorBuilder::new(config)`
//! 2. **Worker launch**: `RuntimeConfig` is derived from
//!    [`PoolConfig::runtime`] plus the slot's settings and handed to the
//!    spawn collaborator (serialized into the `WORKER_CONFIG` env var by the
//!    default spawner).
//!
//! ## Sentinel values
//! - `bus_capacity` is clamped to a minimum of 1 by the bus.
//! - `debounce = 0s` means readiness flips on the next loop turn after the
//!   pool fills (the confirmation tick still runs, so the flip is still
//!   re-validated against the current size).

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::workers::WorkerSettings;

/// Global configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `debounce`: how long the pool must stay full before "ready" is reported
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `error_log`: path of the append-only exit log
/// - `runtime`: pool-wide defaults pushed to every worker
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Debounce window for the NotReady → Ready transition.
    ///
    /// The pool is reported ready only after its size has equaled the
    /// expected count continuously for this long. Any shrink is reported
    /// immediately, without debounce.
    pub debounce: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages
    /// will receive `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Path of the append-only error log written on every worker exit.
    ///
    /// Opened lazily on the first exit; open/write failures degrade
    /// observability only and never block restart handling.
    pub error_log: PathBuf,

    /// Pool-wide worker runtime defaults (merged with per-kind overrides
    /// and the slot ordinal at launch time).
    pub runtime: RuntimeDefaults,
}

impl PoolConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for PoolConfig {
    /// Default configuration:
    ///
    /// - `debounce = 2s` (absorbs restart churn before reporting ready)
    /// - `bus_capacity = 1024`
    /// - `error_log = "error.log"`
    /// - `runtime = RuntimeDefaults::default()`
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(2),
            bus_capacity: 1024,
            error_log: PathBuf::from("error.log"),
            runtime: RuntimeDefaults::default(),
        }
    }
}

/// Pool-wide worker configuration template.
///
/// These are the shared defaults every worker receives; per-kind transport
/// overrides (port, no-delay) take precedence when set on the declaration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeDefaults {
    /// Network port workers should bind or connect to.
    pub port: u16,
    /// Disable Nagle's algorithm on worker sockets.
    pub no_delay: bool,
    /// Interval between worker liveness pings.
    pub ping_interval: Duration,
    /// Interval between worker metric samples.
    pub sampling_interval: Duration,
    /// Interval between worker collection/compaction passes.
    pub collection_interval: Duration,
}

impl Default for RuntimeDefaults {
    fn default() -> Self {
        Self {
            port: 80,
            no_delay: true,
            ping_interval: Duration::from_secs(2),
            sampling_interval: Duration::from_millis(10),
            collection_interval: Duration::from_secs(60),
        }
    }
}

/// Concrete runtime configuration for one worker slot.
///
/// Produced by [`RuntimeConfig::for_slot`] from the pool defaults, the
/// slot's transport overrides, and the slot ordinal. The default spawner
/// serializes this as JSON into the child's `WORKER_CONFIG` env var.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Ordinal slot id of this worker (1-based).
    pub slot: u32,
    /// Total number of slots in the pool.
    pub max_slots: u32,
    /// Resolved network port (kind override or pool default).
    pub port: u16,
    /// Resolved no-delay flag (kind override or pool default).
    pub no_delay: bool,
    /// Liveness ping interval, milliseconds.
    pub ping_interval_ms: u64,
    /// Metric sampling interval, milliseconds.
    pub sampling_interval_ms: u64,
    /// Collection pass interval, milliseconds.
    pub collection_interval_ms: u64,
}

impl RuntimeConfig {
    /// Merges pool defaults with the slot's transport overrides.
    pub fn for_slot(defaults: &RuntimeDefaults, settings: &WorkerSettings, max_slots: u32) -> Self {
        Self {
            slot: settings.slot,
            max_slots,
            port: settings.transport.port.unwrap_or(defaults.port),
            no_delay: settings.transport.no_delay.unwrap_or(defaults.no_delay),
            ping_interval_ms: defaults.ping_interval.as_millis() as u64,
            sampling_interval_ms: defaults.sampling_interval.as_millis() as u64,
            collection_interval_ms: defaults.collection_interval.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workers::{Transport, WorkerSettings};
    use std::path::PathBuf;

    fn settings(slot: u32, port: Option<u16>) -> WorkerSettings {
        WorkerSettings {
            slot,
            exec: PathBuf::from("worker.bin"),
            transport: Transport {
                port,
                no_delay: None,
            },
            send_slot: false,
            start_message: None,
        }
    }

    #[test]
    fn runtime_config_uses_pool_defaults() {
        let cfg = RuntimeConfig::for_slot(&RuntimeDefaults::default(), &settings(2, None), 4);
        assert_eq!(cfg.slot, 2);
        assert_eq!(cfg.max_slots, 4);
        assert_eq!(cfg.port, 80);
        assert!(cfg.no_delay);
        assert_eq!(cfg.ping_interval_ms, 2000);
        assert_eq!(cfg.collection_interval_ms, 60_000);
    }

    #[test]
    fn kind_override_beats_pool_default() {
        let cfg = RuntimeConfig::for_slot(&RuntimeDefaults::default(), &settings(1, Some(9090)), 1);
        assert_eq!(cfg.port, 9090);
    }

    #[test]
    fn bus_capacity_is_clamped() {
        let mut cfg = PoolConfig::default();
        cfg.bus_capacity = 0;
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
