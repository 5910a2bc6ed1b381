//! Balancer: the single context the host holds.
//!
//! Owns the registry (no global state) and borrows nothing from the host
//! except through its [`Topology`] implementation.

use bevy_prng::WyRand;
use log::info;
use rand_core::RngCore;

use crate::config::{BalancerConfig, ConfigError};
use crate::host::sdk::{ConnectionEvent, replay};
use crate::systems::capacity::CapacityParams;
use crate::systems::registry::{ConnectionState, Registry};
use crate::systems::sdk::Topology;
use crate::systems::throttle;
use crate::{ConnectionId, TickOutcome};

pub struct Balancer<T, R = WyRand> {
    topology: T,
    registry: Registry<R>,
    params: CapacityParams,
}

impl<T: Topology> Balancer<T, WyRand> {
    pub fn new(topology: T, cfg: BalancerConfig) -> Result<Self, ConfigError> {
        let registry = Registry::seeded(cfg.seed, cfg.seeding);
        Self::assemble(topology, cfg, registry)
    }
}

impl<T: Topology, R: RngCore> Balancer<T, R> {
    /// Build with a caller-supplied counter RNG.
    pub fn with_rng(topology: T, cfg: BalancerConfig, rng: R) -> Result<Self, ConfigError> {
        let registry = Registry::new(rng, cfg.seeding);
        Self::assemble(topology, cfg, registry)
    }

    fn assemble(topology: T, cfg: BalancerConfig, registry: Registry<R>) -> Result<Self, ConfigError> {
        cfg.validate()?;
        info!(
            "balancer ready: baseline={} fallback={} seeding={:?}",
            cfg.capacity.baseline_throughput, cfg.capacity.fallback_capacity, cfg.seeding
        );
        Ok(Self {
            topology,
            registry,
            params: cfg.capacity,
        })
    }

    /// Recompute the capacity of the connection named by `event`.
    pub fn handle(&mut self, event: ConnectionEvent) -> ConnectionState {
        self.register_or_refresh(event.connection())
    }

    pub fn handle_all<I>(&mut self, events: I) -> Vec<(ConnectionId, ConnectionState)>
    where
        I: IntoIterator<Item = ConnectionEvent>,
    {
        replay(events, |ev| self.handle(ev))
    }

    pub fn register_or_refresh(&mut self, connection: ConnectionId) -> ConnectionState {
        self.registry
            .register_or_refresh(&self.topology, &self.params, connection)
    }

    pub fn on_tick(&mut self, connection: ConnectionId, base_rate: i64) -> TickOutcome {
        throttle::on_tick(&mut self.registry, connection, base_rate)
    }

    pub fn get(&self, connection: ConnectionId) -> Option<ConnectionState> {
        self.registry.get(connection)
    }

    pub fn registry(&self) -> &Registry<R> {
        &self.registry
    }

    /// Mutable topology access for hosts that edit the network in place.
    /// Changes take effect on the next event for the affected connection.
    pub fn topology_mut(&mut self) -> &mut T {
        &mut self.topology
    }
}
