// src/systems/sdk.rs

//! # Systems SDK
//!
//! The port between this crate and the host simulation's road network.
//! Systems never reach into host state; they ask a [`Topology`] instead.
//!
//! ## What a host provides
//! - `bound_node(connection)`: the network node the connection building sits
//!   on, if any.
//! - `segment(node, index)`: the segment attached at slot `index` of that
//!   node. Only slot 0 (the primary segment) is consulted.
//!
//! A [`Segment`] is a snapshot: its classification, per-lane descriptors, the
//! average speed over its vehicle lanes (in speed units, 1 unit = 50 km/h),
//! and whether vehicle lanes run forward and/or backward.
//!
//! ## Determinism
//! Lookups must be pure with respect to the topology at call time. The
//! resolver may call them any number of times per registration.
//!
//! [`MemTopology`] is a ready-made in-memory implementation for hosts that
//! snapshot their network, and for tests.

use std::collections::HashMap;

use crate::ConnectionId;
use crate::mechanics::lanes::Lane;

/// Slot of the segment that decides a connection's capacity.
pub const PRIMARY_SEGMENT: usize = 0;

/// Opaque node handle issued by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Network classification of a segment. Only `Road` carries car traffic
/// capacity; everything else resolves to nominal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetClass {
    Road,
    Rail,
    Water,
    Air,
    /// The host could not classify the segment (missing net info).
    Unknown,
}

impl NetClass {
    #[inline]
    pub fn is_road(self) -> bool {
        matches!(self, NetClass::Road)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub class: NetClass,
    pub lanes: Vec<Lane>,
    pub average_lane_speed: f64,
    pub has_forward_vehicle_lanes: bool,
    pub has_backward_vehicle_lanes: bool,
}

impl Segment {
    /// One-way road with `car_lanes` passenger-car lanes at `speed`.
    pub fn one_way(car_lanes: usize, speed: f64) -> Self {
        Self {
            class: NetClass::Road,
            lanes: vec![Lane::car(); car_lanes],
            average_lane_speed: speed,
            has_forward_vehicle_lanes: car_lanes > 0,
            has_backward_vehicle_lanes: false,
        }
    }

    /// Two-way road with `car_lanes` passenger-car lanes in total.
    pub fn two_way(car_lanes: usize, speed: f64) -> Self {
        Self {
            has_backward_vehicle_lanes: car_lanes > 0,
            ..Self::one_way(car_lanes, speed)
        }
    }

    /// Non-road segment (rail, water, air, ...). Lanes are irrelevant.
    pub fn non_road(class: NetClass) -> Self {
        Self {
            class,
            lanes: Vec::new(),
            average_lane_speed: 0.0,
            has_forward_vehicle_lanes: false,
            has_backward_vehicle_lanes: false,
        }
    }

    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.lanes.push(lane);
        self
    }
}

/// Read-only view of the host's road network.
pub trait Topology {
    fn bound_node(&self, connection: ConnectionId) -> Option<NodeId>;
    fn segment(&self, node: NodeId, index: usize) -> Option<Segment>;
}

impl<T: Topology + ?Sized> Topology for &T {
    fn bound_node(&self, connection: ConnectionId) -> Option<NodeId> {
        (**self).bound_node(connection)
    }
    fn segment(&self, node: NodeId, index: usize) -> Option<Segment> {
        (**self).segment(node, index)
    }
}

/// In-memory topology: connection → node bindings plus per-node segment slots.
#[derive(Clone, Debug, Default)]
pub struct MemTopology {
    bindings: HashMap<ConnectionId, NodeId>,
    slots: HashMap<NodeId, Vec<Option<Segment>>>,
}

impl MemTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `connection` to `node` (replaces any earlier binding).
    pub fn bind(&mut self, connection: ConnectionId, node: NodeId) -> &mut Self {
        self.bindings.insert(connection, node);
        self
    }

    /// Put `segment` at `index` on `node`, leaving lower slots empty if unset.
    pub fn attach(&mut self, node: NodeId, index: usize, segment: Segment) -> &mut Self {
        let slots = self.slots.entry(node).or_default();
        if slots.len() <= index {
            slots.resize(index + 1, None);
        }
        slots[index] = Some(segment);
        self
    }

    /// Drop the segment at `index` on `node`, e.g. when the host deletes it.
    pub fn detach(&mut self, node: NodeId, index: usize) -> Option<Segment> {
        self.slots.get_mut(&node)?.get_mut(index)?.take()
    }

    /// Bind a connection to a fresh node whose primary segment is `segment`.
    /// Node ids mirror connection ids.
    pub fn connect(&mut self, connection: ConnectionId, segment: Segment) -> &mut Self {
        let node = NodeId(connection.0);
        self.bind(connection, node).attach(node, PRIMARY_SEGMENT, segment)
    }
}

impl Topology for MemTopology {
    fn bound_node(&self, connection: ConnectionId) -> Option<NodeId> {
        self.bindings.get(&connection).copied()
    }
    fn segment(&self, node: NodeId, index: usize) -> Option<Segment> {
        self.slots.get(&node)?.get(index)?.clone()
    }
}
