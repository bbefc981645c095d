// Overwrite buffer generation
//
// Every destructive pass builds its write buffer here. Buffers are always
// length-exact: an overwrite must match the target file's current byte
// length, never truncate or extend it.

use rand::RngCore;

/// Produce exactly `len` pseudo-random bytes.
///
/// The fill data only has to be unpredictable enough to defeat content
/// recovery, it is never used as key material, so the thread RNG is
/// sufficient.
pub fn random_buffer(len: usize, rng: &mut impl RngCore) -> Vec<u8> {
    let mut buffer = vec![0u8; len];
    rng.fill_bytes(&mut buffer);
    buffer
}

/// Produce exactly `len` copies of a single byte value.
pub fn fixed_buffer(len: usize, value: u8) -> Vec<u8> {
    vec![value; len]
}
