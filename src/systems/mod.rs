pub mod sdk;
pub mod capacity;
pub mod registry;
pub mod throttle;
