//! Capacity resolver: topology → capacity multiplier for one connection.
//!
//! 1.0 is one direction of the baseline 3-lane highway. Anything the resolver
//! cannot classify as a drivable road resolves to the fallback (nominal).

use log::debug;

use crate::ConnectionId;
use crate::mechanics::capacity::{self as cap, BASELINE_THROUGHPUT, NOMINAL_CAPACITY};
use crate::mechanics::lanes::LaneFilter;
use crate::systems::sdk::{PRIMARY_SEGMENT, Topology};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapacityParams {
    /// Lanes × speed of the road that maps to 1.0.
    pub baseline_throughput: f64,
    /// Returned whenever the topology cannot be resolved to a road.
    pub fallback_capacity: f64,
    pub lane_filter: LaneFilter,
}

impl Default for CapacityParams {
    fn default() -> Self {
        Self {
            baseline_throughput: BASELINE_THROUGHPUT,
            fallback_capacity: NOMINAL_CAPACITY,
            lane_filter: LaneFilter::default(),
        }
    }
}

/// Resolve the capacity multiplier of `connection`. Pure; never negative.
pub fn compute_capacity<T: Topology + ?Sized>(
    topology: &T,
    connection: ConnectionId,
    params: &CapacityParams,
) -> f64 {
    let Some(node) = topology.bound_node(connection) else {
        debug!("connection {connection}: no bound node, using fallback capacity");
        return params.fallback_capacity;
    };
    let Some(segment) = topology.segment(node, PRIMARY_SEGMENT) else {
        debug!("connection {connection}: node {node:?} has no primary segment, using fallback capacity");
        return params.fallback_capacity;
    };
    if !segment.class.is_road() {
        debug!("connection {connection}: {:?} segment, using fallback capacity", segment.class);
        return params.fallback_capacity;
    }

    let car_lanes = params.lane_filter.count(&segment.lanes);
    let lanes = cap::directional_lanes(
        car_lanes,
        segment.has_forward_vehicle_lanes,
        segment.has_backward_vehicle_lanes,
    );
    let raw = cap::relative_throughput(lanes, segment.average_lane_speed, params.baseline_throughput);
    cap::split_multiplier(raw)
}
