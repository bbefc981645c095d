//! File-level encryption round trips over real temporary files.

#[path = "common/mod.rs"]
mod common;

use common::write_file;
use scour::cipher::{self, CipherError};
use tempfile::tempdir;

const KEY: &[u8] = b"sixteen byte key";
const OTHER_KEY: &[u8] = b"another 16b key!";

#[test]
fn file_round_trip_restores_the_exact_bytes() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("report.txt");
    let encrypted = dir.path().join("report.enc");
    let decrypted = dir.path().join("report.dec");

    let content = b"quarterly numbers, not for everyone";
    write_file(&plain, content);

    cipher::encrypt_file(&plain, KEY, &encrypted).unwrap();
    let ciphertext = std::fs::read(&encrypted).unwrap();
    assert_ne!(&ciphertext[..], &content[..]);
    assert_eq!(ciphertext.len() % 16, 0);

    cipher::decrypt_file(&encrypted, KEY, &decrypted).unwrap();
    assert_eq!(std::fs::read(&decrypted).unwrap(), content);
}

#[test]
fn empty_and_large_files_round_trip() {
    let dir = tempdir().unwrap();

    for content in [Vec::new(), vec![0x5Au8; 64 * 1024]] {
        let plain = dir.path().join("in.bin");
        let encrypted = dir.path().join("out.enc");
        let decrypted = dir.path().join("back.bin");
        write_file(&plain, &content);

        cipher::encrypt_file(&plain, KEY, &encrypted).unwrap();
        cipher::decrypt_file(&encrypted, KEY, &decrypted).unwrap();
        assert_eq!(std::fs::read(&decrypted).unwrap(), content);
    }
}

#[test]
fn wrong_key_fails_or_differs_but_never_leaks_the_plaintext() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("secret.txt");
    let encrypted = dir.path().join("secret.enc");
    let decrypted = dir.path().join("secret.dec");

    let content = b"plaintext that must not survive a wrong key";
    write_file(&plain, content);
    cipher::encrypt_file(&plain, KEY, &encrypted).unwrap();

    match cipher::decrypt_file(&encrypted, OTHER_KEY, &decrypted) {
        Err(CipherError::InvalidCiphertext) => {
            assert!(!decrypted.exists());
        }
        Ok(()) => {
            assert_ne!(std::fs::read(&decrypted).unwrap(), content.to_vec());
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn missing_source_is_an_io_error() {
    let dir = tempdir().unwrap();
    let result = cipher::encrypt_file(
        &dir.path().join("not-there.txt"),
        KEY,
        &dir.path().join("out.enc"),
    );
    assert!(matches!(result, Err(CipherError::Io(_))));
}

#[test]
fn invalid_key_length_is_rejected_before_any_io() {
    let dir = tempdir().unwrap();
    let destination = dir.path().join("never-written.enc");

    let result = cipher::encrypt_file(&dir.path().join("also-missing.txt"), b"short", &destination);
    assert!(matches!(result, Err(CipherError::InvalidKeyLength { actual: 5 })));
    // key validation fires before the source is even read
    assert!(!destination.exists());
}

#[test]
fn corrupted_ciphertext_is_rejected() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("doc.txt");
    let encrypted = dir.path().join("doc.enc");
    write_file(&plain, b"some document body");
    cipher::encrypt_file(&plain, KEY, &encrypted).unwrap();

    // drop the final byte: no longer block-aligned, always rejected
    let mut ciphertext = std::fs::read(&encrypted).unwrap();
    ciphertext.pop();
    write_file(&encrypted, &ciphertext);

    let result = cipher::decrypt_file(&encrypted, KEY, &dir.path().join("doc.dec"));
    assert!(matches!(result, Err(CipherError::InvalidCiphertext)));
}
