//! Builder for constructing a [`Supervisor`] with optional collaborators.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::PoolConfig;
use crate::events::Bus;
use crate::process::{OsSpawner, Spawn};
use crate::subscribers::{Subscribe, SubscriberSet};

use super::supervisor::Supervisor;

/// Builder for a [`Supervisor`].
///
/// ## Example
/// ```rust
/// use forkvisor::{PoolConfig, SupervisorBuilder};
///
/// let sup = SupervisorBuilder::new(PoolConfig::default()).build();
/// let _ready = sup.readiness();
/// ```
pub struct SupervisorBuilder {
    cfg: PoolConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    spawner: Option<Arc<dyn Spawn>>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: PoolConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            spawner: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (worker lifecycle, restart
    /// decisions, readiness flips) through dedicated workers with bounded
    /// queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Replaces the spawn collaborator (default: [`OsSpawner`]).
    pub fn with_spawner(mut self, spawner: Arc<dyn Spawn>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    /// Builds the supervisor, wiring bus, subscriber set, and spawner.
    pub fn build(self) -> Supervisor {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));
        let spawner = self.spawner.unwrap_or_else(|| Arc::new(OsSpawner::new()));
        let shutdown = CancellationToken::new();

        Supervisor::new_internal(self.cfg, bus, subs, spawner, shutdown)
    }
}
