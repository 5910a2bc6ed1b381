//! Fractional accumulator: turns a sub-unit rate into whole allowed ticks.

/// Largest counter value below 1.0.
pub const MAX_COUNTER: f64 = 1.0 - f64::EPSILON / 2.0;

/// Advance `counter` by `capacity`. Returns whether the tick fires and the
/// new counter, which stays in `[0, 1)` when it started there.
#[inline]
pub fn advance(counter: f64, capacity: f64) -> (bool, f64) {
    let next = counter + capacity;
    if next >= 1.0 { (true, next - 1.0) } else { (false, next) }
}

/// Scale an integer rate by `capacity`, rounding up so a nonzero rate never
/// truncates to 0 unless capacity is 0. Nominal capacity returns the rate
/// untouched; otherwise rates beyond 2^53 lose precision in the float product.
#[inline]
pub fn scale_rate(base_rate: i64, capacity: f64) -> i64 {
    if capacity == 1.0 {
        return base_rate;
    }
    (base_rate as f64 * capacity).ceil() as i64
}

/// Capacity domain is `[0, inf)`; NaN, infinities and negatives become 0.
#[inline]
pub fn clamp_capacity(capacity: f64) -> f64 {
    if capacity.is_finite() && capacity > 0.0 { capacity } else { 0.0 }
}

/// Counter domain is `[0, 1)`; NaN and negatives become 0.
#[inline]
pub fn clamp_counter(counter: f64) -> f64 {
    if counter.is_nan() || counter < 0.0 { 0.0 } else { counter.min(MAX_COUNTER) }
}
