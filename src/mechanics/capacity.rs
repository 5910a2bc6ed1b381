//! Capacity mechanics: lane count × speed → throughput multiplier.

/// Throughput of the baseline road: 3 lanes × 2 speed units (1 unit = 50 km/h).
pub const BASELINE_THROUGHPUT: f64 = 6.0;

/// Multiplier of the baseline road; also the fallback for anything unresolvable.
pub const NOMINAL_CAPACITY: f64 = 1.0;

/// Lanes serving one direction. Two-way roads split evenly, so a 1+2 road
/// counts as 1.5 each way.
#[inline]
pub fn directional_lanes(car_lanes: usize, forward: bool, backward: bool) -> f64 {
    let lanes = car_lanes as f64;
    if forward && backward { lanes / 2.0 } else { lanes }
}

/// Throughput relative to the baseline road: lanes * speed / baseline.
/// Negative or NaN inputs collapse to 0.
#[inline]
pub fn relative_throughput(lanes: f64, avg_speed: f64, baseline: f64) -> f64 {
    (lanes * avg_speed / baseline).max(0.0)
}

/// Split a throughput ratio across offer frequency and offer size.
/// Both are scaled by the result, so their product stays linear in `raw`.
#[inline]
pub fn split_multiplier(raw: f64) -> f64 {
    raw.max(0.0).sqrt()
}
