// Fixed-byte overwrite
//
// Same mechanics as the random pass, but every byte of the buffer is a
// single supplied value.

use super::{file_length, write_full, PassResult};
use crate::fill;
use std::path::Path;

/// Overwrite the file with a single repeated byte value, `iterations` times.
///
/// Returns the total number of bytes written.
pub fn overwrite_fixed(path: &Path, value: u8, iterations: u32) -> PassResult<u64> {
    let length = file_length(path)? as usize;
    let buffer = fill::fixed_buffer(length, value);

    for _ in 0..iterations {
        write_full(path, &buffer)?;
    }

    Ok(length as u64 * u64::from(iterations))
}
