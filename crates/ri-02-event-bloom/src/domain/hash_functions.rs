//! Hash functions for the event bloom
//!
//! One MurmurHash3 x64/128 call per element. Its two 64-bit halves are the
//! bases for double hashing: position(i) = h1 + i * h2 (mod m).

use std::io::Cursor;

/// Split the 128-bit murmur hash of `element` into `(h1, h2)`.
///
/// `h2` is forced odd so successive positions never collapse onto `h1`.
pub fn base_hashes(element: &[u8], tweak: u32) -> (u64, u64) {
    // Reading from an in-memory cursor cannot fail.
    let hash = murmur3::murmur3_x64_128(&mut Cursor::new(element), tweak).unwrap_or(0);
    let h1 = hash as u64;
    let h2 = (hash >> 64) as u64 | 1;
    (h1, h2)
}

/// Compute `k` bit positions in a filter of `m` bits.
pub fn compute_hash_positions(element: &[u8], k: usize, m: usize, tweak: u32) -> Vec<usize> {
    let (h1, h2) = base_hashes(element, tweak);
    let m = m as u64;

    (0..k as u64)
        .map(|i| (h1.wrapping_add(i.wrapping_mul(h2)) % m) as usize)
        .collect()
}
