// Symmetric file and string encryption
//
// AES-128 in ECB mode with PKCS#7 padding, matching the default cipher
// transformation of the tool this one replaces, so archives encrypted there
// still decrypt here byte-for-byte. ECB encrypts equal plaintext blocks to
// equal ciphertext blocks and therefore leaks content structure; callers
// who need semantic security over fresh data should reach for an AEAD
// (e.g. AES-GCM or ChaCha20-Poly1305) instead of this module.
//
// Ciphertext carries no header, magic, or IV; an encrypt/decrypt pair here
// is only self-consistent with itself. Keys are caller-owned, scoped to a
// single call, and never persisted.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use std::fs;
use std::path::Path;
use thiserror::Error;

type Aes128EcbEnc = ecb::Encryptor<aes::Aes128>;
type Aes128EcbDec = ecb::Decryptor<aes::Aes128>;

/// Required key length in bytes (AES-128).
pub const KEY_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("key must be exactly 16 bytes, got {actual}")]
    InvalidKeyLength { actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ciphertext is corrupt or was produced under a different key")]
    InvalidCiphertext,

    #[error("decrypted data is not valid UTF-8")]
    InvalidUtf8,
}

pub type CipherResult<T> = Result<T, CipherError>;

fn check_key(key: &[u8]) -> CipherResult<()> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength { actual: key.len() });
    }
    Ok(())
}

/// Encrypt a byte buffer under a 16-byte key.
///
/// Output length is the input padded up to the next whole block, so even an
/// empty input produces one 16-byte block.
pub fn encrypt_bytes(plaintext: &[u8], key: &[u8]) -> CipherResult<Vec<u8>> {
    check_key(key)?;
    let cipher = Aes128EcbEnc::new_from_slice(key)
        .map_err(|_| CipherError::InvalidKeyLength { actual: key.len() })?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt a byte buffer under a 16-byte key.
///
/// Fails with [`CipherError::InvalidCiphertext`] when the input is not
/// block-aligned or the padding does not check out, the usual symptom of a
/// wrong key or corrupted data.
pub fn decrypt_bytes(ciphertext: &[u8], key: &[u8]) -> CipherResult<Vec<u8>> {
    check_key(key)?;
    let cipher = Aes128EcbDec::new_from_slice(key)
        .map_err(|_| CipherError::InvalidKeyLength { actual: key.len() })?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::InvalidCiphertext)
}

/// Encrypt a string; convenience wrapper over [`encrypt_bytes`].
pub fn encrypt_str(text: &str, key: &[u8]) -> CipherResult<Vec<u8>> {
    encrypt_bytes(text.as_bytes(), key)
}

/// Decrypt to a string; fails on non-UTF-8 plaintext.
pub fn decrypt_str(ciphertext: &[u8], key: &[u8]) -> CipherResult<String> {
    let plain = decrypt_bytes(ciphertext, key)?;
    String::from_utf8(plain).map_err(|_| CipherError::InvalidUtf8)
}

/// Encrypt a file whole: read `source` into memory, encrypt, write
/// `destination`. Files larger than available memory are out of scope:
/// there is no streaming mode.
pub fn encrypt_file(source: &Path, key: &[u8], destination: &Path) -> CipherResult<()> {
    check_key(key)?;
    let plaintext = fs::read(source)?;
    let ciphertext = encrypt_bytes(&plaintext, key)?;
    fs::write(destination, ciphertext)?;
    Ok(())
}

/// Inverse of [`encrypt_file`], with the same failure modes plus
/// [`CipherError::InvalidCiphertext`] for input the matching encrypt call
/// did not produce.
pub fn decrypt_file(source: &Path, key: &[u8], destination: &Path) -> CipherResult<()> {
    check_key(key)?;
    let ciphertext = fs::read(source)?;
    let plaintext = decrypt_bytes(&ciphertext, key)?;
    fs::write(destination, plaintext)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef";
    const OTHER_KEY: &[u8] = b"fedcba9876543210";

    #[test]
    fn bytes_round_trip() {
        let plain = b"some moderately secret payload";
        let ct = encrypt_bytes(plain, KEY).unwrap();
        assert_ne!(&ct[..], &plain[..]);
        assert_eq!(decrypt_bytes(&ct, KEY).unwrap(), plain);
    }

    #[test]
    fn string_round_trip_at_various_sizes() {
        for text in ["", "x", "hello world", &"paragraph ".repeat(1000)] {
            let ct = encrypt_str(text, KEY).unwrap();
            assert_eq!(decrypt_str(&ct, KEY).unwrap(), text);
        }
    }

    #[test]
    fn empty_input_still_produces_one_block() {
        let ct = encrypt_bytes(b"", KEY).unwrap();
        assert_eq!(ct.len(), 16);
    }

    #[test]
    fn ciphertext_is_block_aligned() {
        for len in [1usize, 15, 16, 17, 4096] {
            let ct = encrypt_bytes(&vec![0xAB; len], KEY).unwrap();
            assert_eq!(ct.len() % 16, 0);
            assert!(ct.len() > len, "padding always adds at least one byte");
        }
    }

    #[test]
    fn wrong_key_never_yields_the_plaintext() {
        let plain = b"do not leak me under the wrong key";
        let ct = encrypt_bytes(plain, KEY).unwrap();
        match decrypt_bytes(&ct, OTHER_KEY) {
            Err(CipherError::InvalidCiphertext) => {}
            Ok(other) => assert_ne!(other, plain.to_vec()),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn short_and_long_keys_are_rejected() {
        for key in [&b""[..], &b"short"[..], &b"0123456789abcdef0"[..]] {
            assert!(matches!(
                encrypt_bytes(b"data", key),
                Err(CipherError::InvalidKeyLength { .. })
            ));
            assert!(matches!(
                decrypt_bytes(&[0u8; 16], key),
                Err(CipherError::InvalidKeyLength { .. })
            ));
        }
    }

    #[test]
    fn truncated_ciphertext_is_rejected() {
        let ct = encrypt_bytes(b"sixteen byte msg", KEY).unwrap();
        assert!(matches!(
            decrypt_bytes(&ct[..ct.len() - 1], KEY),
            Err(CipherError::InvalidCiphertext)
        ));
    }

    #[test]
    fn equal_blocks_encrypt_equally() {
        // the documented ECB property: identical plaintext blocks map to
        // identical ciphertext blocks
        let plain = [0x42u8; 32];
        let ct = encrypt_bytes(&plain, KEY).unwrap();
        assert_eq!(&ct[0..16], &ct[16..32]);
    }

    #[test]
    fn non_utf8_plaintext_fails_decrypt_str() {
        let ct = encrypt_bytes(&[0xFF, 0xFE, 0x80], KEY).unwrap();
        assert!(matches!(
            decrypt_str(&ct, KEY),
            Err(CipherError::InvalidUtf8)
        ));
    }
}
