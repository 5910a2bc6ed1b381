// src/host/sdk.rs

//! # Host SDK
//!
//! Glue for wiring the balancer into a host simulation.
//!
//! ## Events the host forwards
//! The host notifies the balancer whenever a connection's road may have
//! changed. Every variant triggers a full capacity refresh:
//! - [`ConnectionEvent::Loaded`]: a connection found while loading a save.
//! - [`ConnectionEvent::Created`]: a connection built during play.
//! - [`ConnectionEvent::Upgraded`]: the connection's road type was replaced.
//!
//! Only forward connection-like buildings. The balancer does no type checks;
//! anything never registered is left untouched at tick time.
//!
//! ## Ticks
//! Call `on_tick` once per connection per offer cycle (every few simulated
//! seconds, only while unpaused). Run the offer generation with the returned
//! rate when `allow` is set; otherwise skip it for this cycle.

use crate::ConnectionId;
use crate::systems::registry::ConnectionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    Loaded(ConnectionId),
    Created(ConnectionId),
    Upgraded(ConnectionId),
}

impl ConnectionEvent {
    #[inline]
    pub fn connection(self) -> ConnectionId {
        match self {
            ConnectionEvent::Loaded(id)
            | ConnectionEvent::Created(id)
            | ConnectionEvent::Upgraded(id) => id,
        }
    }
}

/// Feed a batch of events through `handle`, collecting the resulting states
/// in event order.
pub fn replay<I, F>(events: I, mut handle: F) -> Vec<(ConnectionId, ConnectionState)>
where
    I: IntoIterator<Item = ConnectionEvent>,
    F: FnMut(ConnectionEvent) -> ConnectionState,
{
    let events = events.into_iter();
    let mut out = Vec::with_capacity(events.size_hint().0);
    for ev in events {
        out.push((ev.connection(), handle(ev)));
    }
    out
}
