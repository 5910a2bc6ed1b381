//! Balancer configuration and its validation.

use thiserror::Error;

use crate::systems::capacity::CapacityParams;
use crate::systems::registry::CounterSeeding;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Baseline throughput must be positive and finite, got {0}")]
    InvalidBaseline(f64),
    #[error("Fallback capacity must be non-negative and finite, got {0}")]
    InvalidFallback(f64),
    #[error("Lane filter has an empty mask and would never match a lane")]
    EmptyLaneFilter,
    #[error("Counter seeding needs at least one bucket")]
    ZeroBuckets,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalancerConfig {
    pub capacity: CapacityParams,
    pub seeding: CounterSeeding,
    /// Seed of the default counter RNG.
    pub seed: u64,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            capacity: CapacityParams::default(),
            seeding: CounterSeeding::Uniform,
            seed: 0x5EED_0C0A,
        }
    }
}

impl BalancerConfig {
    /// Defaults with counters on a coarse 1/256 grid.
    pub fn classic() -> Self {
        Self {
            seeding: CounterSeeding::Buckets(256),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.capacity.baseline_throughput;
        if !(base.is_finite() && base > 0.0) {
            return Err(ConfigError::InvalidBaseline(base));
        }
        let fb = self.capacity.fallback_capacity;
        if !(fb.is_finite() && fb >= 0.0) {
            return Err(ConfigError::InvalidFallback(fb));
        }
        if self.capacity.lane_filter.is_degenerate() {
            return Err(ConfigError::EmptyLaneFilter);
        }
        if self.seeding == CounterSeeding::Buckets(0) {
            return Err(ConfigError::ZeroBuckets);
        }
        Ok(())
    }
}
