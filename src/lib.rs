/*!
`traffic_balance` — capacity-derived throttling of outside-connection traffic.

What it does
- Resolves a capacity multiplier per outside connection from the road it sits
  on (car lanes, average speed, one- or two-way), where 1.0 is one direction
  of the baseline 3-lane highway.
- Keeps a registry of `(capacity, counter)` per connection.
- Decides each tick whether a connection's offer generation runs and by how
  much its production rate is scaled.

How to use (call surface only)
- Implement [`systems::sdk::Topology`] over your road network (or fill a
  [`systems::sdk::MemTopology`]).
- Build a [`host::Balancer`] from the topology and a [`BalancerConfig`].
- Forward lifecycle events with `Balancer::handle(ConnectionEvent::…)`.
- Once per connection per tick call `Balancer::on_tick(id, base_rate)` and run
  or skip the offer generation according to the returned [`TickOutcome`].

What it does NOT do
- No tick dispatch, no persistence, no UI. The host drives everything.
*/

use std::fmt;

pub mod config;
pub mod host;
pub mod mechanics;
pub mod systems;

pub use config::{BalancerConfig, ConfigError};
pub use host::{Balancer, ConnectionEvent};
pub use systems::capacity::{CapacityParams, compute_capacity};
pub use systems::registry::{ConnectionState, CounterSeeding, Registry};
pub use systems::throttle::on_tick;

/// Host-assigned identity of an outside connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u32);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of one tick decision.
/// A skipped tick carries the base rate unchanged; the host must not act on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub allow: bool,
    pub rate: i64,
}

impl TickOutcome {
    #[inline]
    pub fn run(rate: i64) -> Self {
        Self { allow: true, rate }
    }
    #[inline]
    pub fn skipped(base_rate: i64) -> Self {
        Self { allow: false, rate: base_rate }
    }
    /// Untracked connection: runs at its base rate.
    #[inline]
    pub fn passthrough(base_rate: i64) -> Self {
        Self::run(base_rate)
    }
    #[inline]
    pub fn into_parts(self) -> (bool, i64) {
        (self.allow, self.rate)
    }
}
