// Memory-mapped random overwrite
//
// Maps the file's full extent read-write, overwrites the mapped region with
// fresh random bytes, and forces a synchronous flush to the underlying
// medium before unmapping. Stronger than a buffered write: the flush has
// reached the device (or its write-back queue) by the time the pass
// returns. The mapping is scoped to the pass body, so it is released on
// every exit path, including errors.

use super::{PassError, PassResult};
use crate::fill;
use memmap2::MmapOptions;
use std::fs::OpenOptions;
use std::path::Path;

/// Overwrite the file through a read-write memory mapping, `iterations`
/// times, flushing after each iteration.
///
/// Returns the total number of bytes written. A zero-length file succeeds
/// without mapping anything: there is no extent to map, and nothing to
/// overwrite.
pub fn overwrite_mapped(path: &Path, iterations: u32) -> PassResult<u64> {
    let file = OpenOptions::new()
        .read(true)
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
        .len() as usize;

    if length == 0 {
        return Ok(0);
    }

    let mut rng = rand::thread_rng();

    for _ in 0..iterations {
        let mut map =
            unsafe { MmapOptions::new().map_mut(&file) }.map_err(|source| PassError::Map {
                path: path.to_path_buf(),
                source,
            })?;

        map.copy_from_slice(&fill::random_buffer(length, &mut rng));

        map.flush().map_err(|source| PassError::Flush {
            path: path.to_path_buf(),
            source,
        })?;
        // map drops here: unmapped before the next iteration re-maps
    }

    Ok(length as u64 * u64::from(iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn mapped_overwrite_changes_content_and_preserves_length() {
        let mut temp = NamedTempFile::new().unwrap();
        let original = vec![0xEEu8; 8192];
        temp.write_all(&original).unwrap();
        temp.flush().unwrap();

        let written = overwrite_mapped(temp.path(), 1).unwrap();
        assert_eq!(written, 8192);

        let after = std::fs::read(temp.path()).unwrap();
        assert_eq!(after.len(), original.len());
        assert_ne!(after, original);
    }

    #[test]
    fn empty_file_is_a_no_op() {
        let temp = NamedTempFile::new().unwrap();
        assert_eq!(overwrite_mapped(temp.path(), 1).unwrap(), 0);
    }

    #[test]
    fn iterations_accumulate() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[1u8; 512]).unwrap();
        temp.flush().unwrap();

        assert_eq!(overwrite_mapped(temp.path(), 4).unwrap(), 2048);
        assert_eq!(std::fs::metadata(temp.path()).unwrap().len(), 512);
    }

    #[test]
    fn missing_file_fails() {
        assert!(overwrite_mapped(Path::new("/nonexistent/scour-test"), 1).is_err());
    }
}
