// Overwrite pass strategies
//
// A pass is one full application of an overwrite strategy to a regular
// file's current contents. Passes carry no state between invocations other
// than the RNG stream; a policy is an ordered list of passes that a
// destroyer applies to each file before unlinking it.

pub mod burn;
pub mod fixed;
pub mod shred;
pub mod wipe;

use rand::Rng;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single overwrite pass.
///
/// Passes are fail-fast: the first I/O error aborts the pass and is
/// returned to the caller, which decides whether to continue with the rest
/// of its policy.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("failed to stat {path}: {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open {path} for writing: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to overwrite {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to map {path} into memory: {source}")]
    Map {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to flush {path} to disk: {source}")]
    Flush {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type PassResult<T> = Result<T, PassError>;

/// One overwrite strategy, applied to a single regular file.
#[derive(Debug, Clone, PartialEq)]
pub enum OverwritePass {
    /// Full-length buffered overwrite with fresh random bytes, re-randomized
    /// on every iteration.
    Random { iterations: u32 },

    /// Full-length buffered overwrite with a single repeated byte value.
    /// Used after a random pass so the residual magnetic pattern is not
    /// attributable to pure randomness.
    Fixed { value: u8, iterations: u32 },

    /// Memory-mapped overwrite: map the file read-write, fill the mapped
    /// extent with random bytes, flush synchronously to the medium.
    MappedRandom { iterations: u32 },

    /// `floor(len * intensity)` single-byte writes at uniformly random
    /// offsets. At intensity 1.0 this touches roughly 63% of distinct
    /// offsets (birthday bound), not all of them, and costs one syscall per
    /// byte. The slow path; never part of the secure policy.
    PointBurn { intensity: f64 },
}

impl OverwritePass {
    /// Apply this pass to the file at `path`.
    ///
    /// Returns the number of bytes written on success. Zero-length files
    /// succeed trivially for every strategy.
    pub fn apply(&self, path: &Path) -> PassResult<u64> {
        match *self {
            OverwritePass::Random { iterations } => shred::overwrite_random(path, iterations),
            OverwritePass::Fixed { value, iterations } => {
                fixed::overwrite_fixed(path, value, iterations)
            }
            OverwritePass::MappedRandom { iterations } => wipe::overwrite_mapped(path, iterations),
            OverwritePass::PointBurn { intensity } => burn::burn(path, intensity),
        }
    }
}

/// An ordered sequence of overwrite passes applied to each file before it
/// is unlinked.
#[derive(Debug, Clone)]
pub struct DestructionPolicy {
    passes: Vec<OverwritePass>,
}

impl DestructionPolicy {
    pub fn new(passes: Vec<OverwritePass>) -> Self {
        Self { passes }
    }

    /// No overwrite passes at all: plain (insecure) deletion.
    pub fn unlink_only() -> Self {
        Self { passes: Vec::new() }
    }

    /// The secure-delete composition: one random pass, one fixed pass with
    /// a freshly drawn random byte, one memory-mapped random pass.
    pub fn secure() -> Self {
        let value = rand::thread_rng().gen::<u8>();
        Self {
            passes: vec![
                OverwritePass::Random { iterations: 1 },
                OverwritePass::Fixed {
                    value,
                    iterations: 1,
                },
                OverwritePass::MappedRandom { iterations: 1 },
            ],
        }
    }

    pub fn passes(&self) -> &[OverwritePass] {
        &self.passes
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for DestructionPolicy {
    fn default() -> Self {
        Self::secure()
    }
}

/// Current byte length of the target file.
pub(crate) fn file_length(path: &Path) -> PassResult<u64> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| PassError::Stat {
            path: path.to_path_buf(),
            source,
        })
}

/// Replace the file's contents with `buffer`, which must already match the
/// file's length. Opens with truncation, writes the full buffer, syncs to
/// the medium, and closes on every exit path.
pub(crate) fn write_full(path: &Path, buffer: &[u8]) -> PassResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|source| PassError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    file.write_all(buffer).map_err(|source| PassError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    file.sync_all().map_err(|source| PassError::Flush {
        path: path.to_path_buf(),
        source,
    })
}
