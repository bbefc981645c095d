// Random point overwrite
//
// Seeks to a uniformly random offset and overwrites exactly one byte with a
// random value, `floor(len * intensity)` times. Offsets are sampled
// independently, so at intensity 1.0 the expected coverage is about 63% of
// distinct offsets (1 - 1/e, the birthday bound), never a full overwrite.
// One seek+write syscall pair per byte makes this the slow path by a wide
// margin; the secure policy never uses it.

use super::{PassError, PassResult};
use rand::{Rng, RngCore};
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

/// Overwrite `floor(len * intensity)` randomly chosen single bytes.
///
/// Returns the number of single-byte writes performed. The file's length is
/// never changed: offsets are sampled strictly inside `[0, len)`.
pub fn burn(path: &Path, intensity: f64) -> PassResult<u64> {
    let mut file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|source| PassError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let length = file
        .metadata()
        .map_err(|source| PassError::Stat {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    let writes = (length as f64 * intensity).floor() as u64;
    if length == 0 || writes == 0 {
        return Ok(0);
    }

    let mut rng = rand::thread_rng();
    let mut byte = [0u8; 1];

    for _ in 0..writes {
        let offset = rng.gen_range(0..length);
        rng.fill_bytes(&mut byte);

        file.seek(SeekFrom::Start(offset))
            .and_then(|_| file.write_all(&byte))
            .map_err(|source| PassError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }

    file.sync_all().map_err(|source| PassError::Flush {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(writes)
}
