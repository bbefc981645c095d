//! Shared helpers for the integration suites.

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_file(path: &Path, content: &[u8]) {
    let mut file = File::create(path).expect("create test file");
    file.write_all(content).expect("write test file");
    file.sync_all().expect("sync test file");
}
