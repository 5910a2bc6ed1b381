//! Throttle scheduler: per-tick allow/deny and rate scaling.
//!
//! Two mechanisms compose:
//! - below nominal, the accumulator skips ticks so only a `capacity` fraction
//!   of them run;
//! - every tick that runs has its rate multiplied by `capacity` (rounded up).
//!
//! Above nominal only the rate scaling applies.

use log::trace;
use rand_core::RngCore;

use crate::mechanics::accumulator;
use crate::systems::registry::Registry;
use crate::{ConnectionId, TickOutcome};

/// Decide one tick for `connection`. Unregistered connections pass through
/// untouched. The accumulator is committed even when the tick is denied.
pub fn on_tick<R: RngCore>(
    registry: &mut Registry<R>,
    connection: ConnectionId,
    base_rate: i64,
) -> TickOutcome {
    let Some(state) = registry.get(connection) else {
        return TickOutcome::passthrough(base_rate);
    };

    if state.is_throttled() {
        let (fire, counter) = accumulator::advance(state.counter, state.capacity);
        registry.set_counter(connection, counter);
        if !fire {
            trace!("connection {connection}: skip (counter={counter:.4})");
            return TickOutcome::skipped(base_rate);
        }
    }

    let rate = accumulator::scale_rate(base_rate, state.capacity);
    trace!(
        "connection {connection}: run rate {base_rate} -> {rate} (capacity={:.4})",
        state.capacity
    );
    TickOutcome::run(rate)
}
