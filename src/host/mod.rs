// src/host/mod.rs

// Host-facing orchestration: one context object owning the topology view,
// the registry and the capacity parameters, driven by host events and ticks.

pub mod sdk;
pub use sdk::*;

pub mod balancer;
pub use balancer::*;
