//! Stochastic mechanics: unit samplers for counter seeding.
//! Takes any `rand_core::RngCore`; the crate default is `bevy_prng::WyRand`.

use rand_core::RngCore;

/// Uniform(0,1) with 53 bits of resolution; never returns 1.0.
#[inline]
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    ((rng.next_u64() >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Quantized Uniform(0,1): `k / buckets` for `k` in `0..buckets`.
/// `buckets == 0` degrades to 0.0.
#[inline]
pub fn bucketed_unit<R: RngCore + ?Sized>(rng: &mut R, buckets: u32) -> f64 {
    if buckets == 0 {
        return 0.0;
    }
    let k = (unit_f64(rng) * buckets as f64) as u32;
    k.min(buckets - 1) as f64 / buckets as f64
}
