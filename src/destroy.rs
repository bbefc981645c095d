// Recursive destruction
//
// Walks a file-or-directory target depth-first, post-order: every child of
// a directory is destroyed before the directory itself is removed. Failures
// are recorded and processing continues: for a deletion tool a
// half-finished job still leaves strictly less recoverable data than an
// abandoned one, so nothing here short-circuits.

use crate::passes::DestructionPolicy;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where in the destruction of one entry a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Could not stat the entry.
    Stat,
    /// An overwrite pass failed on a regular file.
    Overwrite,
    /// The final unlink of a file failed.
    Unlink,
    /// Listing a directory's children failed.
    ReadDir,
    /// Removing an emptied directory failed.
    RemoveDir,
}

/// A single recorded failure, tied to the path it happened on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestructionFailure {
    pub path: PathBuf,
    pub stage: FailureStage,
    pub message: String,
}

/// Outcome of one destruction run.
///
/// The aggregate signal is [`fully_destroyed`](Self::fully_destroyed); the
/// per-path detail lives in `failures`. Counters cover what actually
/// happened, so a partially failed run still reports the work it did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestructionReport {
    pub files_destroyed: u64,
    pub directories_removed: u64,
    /// Total bytes written across all successful overwrite passes.
    pub bytes_overwritten: u64,
    pub failures: Vec<DestructionFailure>,
}

impl DestructionReport {
    /// True when every entry was overwritten per policy and removed.
    pub fn fully_destroyed(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: &Path, stage: FailureStage, message: impl ToString) {
        self.failures.push(DestructionFailure {
            path: path.to_path_buf(),
            stage,
            message: message.to_string(),
        });
    }
}

/// Destroy `target`, a regular file or a directory tree, applying
/// `policy` to every regular file before unlinking it.
///
/// A target that does not exist is a successful no-op, so repeated calls
/// are idempotent. Directory children are destroyed before the directory
/// is removed; a failing child is recorded and its siblings still run.
pub fn destroy(target: &Path, policy: &DestructionPolicy) -> DestructionReport {
    info!(
        "destroying {} ({} overwrite pass(es) per file)",
        target.display(),
        policy.len()
    );

    let mut report = DestructionReport::default();
    destroy_entry(target, policy, &mut report);

    if report.fully_destroyed() {
        info!(
            "destroyed {}: {} file(s), {} director(ies), {} byte(s) overwritten",
            target.display(),
            report.files_destroyed,
            report.directories_removed,
            report.bytes_overwritten
        );
    } else {
        warn!(
            "destruction of {} incomplete: {} failure(s)",
            target.display(),
            report.failures.len()
        );
    }

    report
}

/// Destroy with the secure three-pass policy: random fill, fixed fill with
/// a fresh random byte, memory-mapped random fill.
pub fn secure_delete(target: &Path) -> DestructionReport {
    destroy(target, &DestructionPolicy::secure())
}

/// Plain recursive deletion: no overwrite passes, unlink only. Insecure,
/// the content stays recoverable on the medium.
pub fn delete(target: &Path) -> DestructionReport {
    destroy(target, &DestructionPolicy::unlink_only())
}

fn destroy_entry(target: &Path, policy: &DestructionPolicy, report: &mut DestructionReport) {
    // symlink_metadata so a symlink is unlinked as itself, never followed
    // into a target outside the tree being destroyed
    let metadata = match fs::symlink_metadata(target) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist, nothing to destroy", target.display());
            return;
        }
        Err(e) => {
            report.record(target, FailureStage::Stat, e);
            return;
        }
    };

    if metadata.is_dir() {
        destroy_directory(target, policy, report);
    } else {
        destroy_file(target, &metadata, policy, report);
    }
}

fn destroy_directory(dir: &Path, policy: &DestructionPolicy, report: &mut DestructionReport) {
    match fs::read_dir(dir) {
        Ok(entries) => {
            for entry in entries {
                match entry {
                    Ok(entry) => destroy_entry(&entry.path(), policy, report),
                    Err(e) => report.record(dir, FailureStage::ReadDir, e),
                }
            }
        }
        Err(e) => report.record(dir, FailureStage::ReadDir, e),
    }

    // attempted even after child failures: it succeeds exactly when the
    // directory really is empty
    match fs::remove_dir(dir) {
        Ok(()) => {
            debug!("removed directory {}", dir.display());
            report.directories_removed += 1;
        }
        Err(e) => report.record(dir, FailureStage::RemoveDir, e),
    }
}

fn destroy_file(
    path: &Path,
    metadata: &fs::Metadata,
    policy: &DestructionPolicy,
    report: &mut DestructionReport,
) {
    if metadata.is_file() {
        for pass in policy.passes() {
            match pass.apply(path) {
                Ok(bytes) => report.bytes_overwritten += bytes,
                Err(e) => {
                    // record and keep going: later passes and the unlink
                    // still reduce recoverability
                    warn!("{}", e);
                    report.record(path, FailureStage::Overwrite, e);
                }
            }
        }
    } else {
        // symlink, fifo, socket: no content of its own to overwrite
        debug!(
            "{} is not a regular file, unlinking without overwrite",
            path.display()
        );
    }

    match fs::remove_file(path) {
        Ok(()) => {
            debug!("unlinked {}", path.display());
            report.files_destroyed += 1;
        }
        Err(e) => report.record(path, FailureStage::Unlink, e),
    }
}
