pub mod accumulator;
pub mod capacity;
pub mod lanes;
pub mod stoch;

pub use accumulator::*;
pub use capacity::*;
pub use lanes::*;
pub use stoch::*;
