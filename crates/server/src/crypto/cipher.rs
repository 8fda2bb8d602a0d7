//! AES-256-GCM encryption of individual string fields.
//!
//! Each call draws a fresh random 96-bit IV from the OS CSPRNG. The IV is
//! never reused and never derived from content; with plain GCM, nonce reuse
//! under the same key breaks both confidentiality and authentication.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::Envelope;
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM initialisation vector (12 bytes = 96 bits).
pub const IV_LEN: usize = 12;

/// Byte length of the GCM authentication tag (128 bits).
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The supplied key string is empty.
    #[error("encryption key is empty")]
    MissingKey,

    /// The key string does not import as exactly [`KEY_LEN`] bytes.
    #[error("key must be exactly {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// The underlying AEAD operation failed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Import key material distributed either as a base64 string or as a raw
/// 32-character secret, with no format flag to tell the two apart.
///
/// Base64 is tried first: if the string decodes and the decoded length is
/// exactly [`KEY_LEN`], the decoded bytes win. Otherwise the raw UTF-8 bytes
/// of the string are used, provided they are exactly [`KEY_LEN`] long. A
/// string that satisfies neither interpretation is rejected.
///
/// # Errors
///
/// Returns [`CipherError::MissingKey`] for an empty string and
/// [`CipherError::InvalidKeyLength`] when neither interpretation yields a
/// 32-byte key.
pub fn import_key(key_string: &str) -> Result<[u8; KEY_LEN], CipherError> {
    if key_string.is_empty() {
        return Err(CipherError::MissingKey);
    }

    if let Ok(decoded) = STANDARD.decode(key_string) {
        if decoded.len() == KEY_LEN {
            let mut key = [0u8; KEY_LEN];
            key.copy_from_slice(&decoded);
            return Ok(key);
        }
        // Valid base64 of the wrong length falls through to the raw path.
    }

    let raw = key_string.as_bytes();
    if raw.len() == KEY_LEN {
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(raw);
        return Ok(key);
    }

    Err(CipherError::InvalidKeyLength)
}

/// Encrypt one plaintext field value under the supplied key string.
///
/// The AEAD primitive returns ciphertext with the 16-byte tag appended; the
/// tag is split off so the envelope carries the two separately. No additional
/// authenticated data is used.
///
/// # Errors
///
/// Returns [`CipherError::MissingKey`] or [`CipherError::InvalidKeyLength`]
/// if the key string does not import, and [`CipherError::EncryptionFailed`]
/// on an AEAD failure or if the combined output is shorter than the tag.
pub fn encrypt_field(
    plaintext: &str,
    key_string: &str,
    version: u32,
) -> Result<Envelope, CipherError> {
    let key = import_key(key_string)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CipherError::InvalidKeyLength)?;

    use aes_gcm::aead::rand_core::RngCore;
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let combined = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|_| CipherError::EncryptionFailed("aead operation failed".into()))?;

    if combined.len() < TAG_LEN {
        return Err(CipherError::EncryptionFailed(format!(
            "output too short: {} bytes",
            combined.len()
        )));
    }

    let (ciphertext, tag) = combined.split_at(combined.len() - TAG_LEN);

    Ok(Envelope {
        ciphertext: STANDARD.encode(ciphertext),
        iv: STANDARD.encode(iv),
        auth_tag: STANDARD.encode(tag),
        version,
    })
}
