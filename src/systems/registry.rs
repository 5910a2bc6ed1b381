//! Connection registry: per-connection capacity and accumulator.
//!
//! Entries are written on registration and never removed; a connection the
//! host deletes leaves a stale entry behind, which is harmless because the
//! host stops ticking it.

use std::collections::HashMap;

use bevy_prng::WyRand;
use log::debug;
use rand_core::{RngCore, SeedableRng};

use crate::ConnectionId;
use crate::mechanics::{accumulator, stoch};
use crate::systems::capacity::{CapacityParams, compute_capacity};
use crate::systems::sdk::Topology;

/// How a fresh counter is drawn from `[0, 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterSeeding {
    /// Full 53-bit resolution.
    #[default]
    Uniform,
    /// `k / n` for `k` in `0..n`, e.g. `Buckets(256)` for a 1/256 grid.
    Buckets(u32),
}

impl CounterSeeding {
    #[inline]
    pub fn sample<R: RngCore + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            CounterSeeding::Uniform => stoch::unit_f64(rng),
            CounterSeeding::Buckets(n) => stoch::bucketed_unit(rng, n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionState {
    pub capacity: f64,
    /// Progress toward the next allowed tick; only advanced while capacity < 1.
    pub counter: f64,
}

impl ConnectionState {
    #[inline]
    pub fn is_throttled(&self) -> bool {
        self.capacity < 1.0
    }
    #[inline]
    pub fn as_pair(&self) -> (f64, f64) {
        (self.capacity, self.counter)
    }
}

pub struct Registry<R = WyRand> {
    entries: HashMap<ConnectionId, ConnectionState>,
    rng: R,
    seeding: CounterSeeding,
}

impl Registry<WyRand> {
    /// Registry drawing counters from a `WyRand` seeded with `seed`.
    pub fn seeded(seed: u64, seeding: CounterSeeding) -> Self {
        Self::new(WyRand::from_seed(seed.to_le_bytes()), seeding)
    }
}

impl<R: RngCore> Registry<R> {
    pub fn new(rng: R, seeding: CounterSeeding) -> Self {
        Self {
            entries: HashMap::new(),
            rng,
            seeding,
        }
    }

    /// Resolve capacity from `topology` and (re)write the entry with a fresh
    /// random counter. Safe to call repeatedly; each call overwrites.
    pub fn register_or_refresh<T: Topology + ?Sized>(
        &mut self,
        topology: &T,
        params: &CapacityParams,
        connection: ConnectionId,
    ) -> ConnectionState {
        let capacity = compute_capacity(topology, connection, params);
        self.upsert(connection, capacity)
    }

    /// Store `capacity` for `connection` and reseed its counter.
    /// Negative or non-finite capacities are stored as 0.
    pub fn upsert(&mut self, connection: ConnectionId, capacity: f64) -> ConnectionState {
        let capacity = accumulator::clamp_capacity(capacity);
        // Random start keeps same-capacity connections from firing together.
        let counter = self.seeding.sample(&mut self.rng);
        let state = ConnectionState { capacity, counter };
        if self.entries.insert(connection, state).is_some() {
            debug!("connection {connection}: refreshed capacity={capacity:.4} counter={counter:.4}");
        } else {
            debug!("connection {connection}: registered capacity={capacity:.4} counter={counter:.4}");
        }
        state
    }

    #[inline]
    pub fn get(&self, connection: ConnectionId) -> Option<ConnectionState> {
        self.entries.get(&connection).copied()
    }

    /// Overwrite the counter of a registered connection, clamped into
    /// `[0, 1)`. Returns false (and does nothing) for unknown connections.
    pub fn set_counter(&mut self, connection: ConnectionId, value: f64) -> bool {
        match self.entries.get_mut(&connection) {
            Some(state) => {
                state.counter = accumulator::clamp_counter(value);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConnectionId, ConnectionState)> + '_ {
        self.entries.iter().map(|(id, st)| (*id, *st))
    }

    pub fn seeding(&self) -> CounterSeeding {
        self.seeding
    }
}
