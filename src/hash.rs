//! Salted SHA-512 hashing and verification.
//!
//! Digests are always base64 encoded, salted or not. A salted hash is computed
//! over `text + salt`, where `salt` is the base64 text of [`SALT_SIZE`] random
//! bytes, and the salt is returned next to the digest so it can be stored.
//!
//! Verification recomputes the digest and compares it in constant time.

use std::time::Instant;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha512};
use subtle::ConstantTimeEq;

use crate::config::{DIGEST_SIZE, SALT_SIZE};
use crate::error::{CipherError, Result};
use crate::random::generate_salt;

/// A computed SHA-512 digest.
pub struct Digest {
    bytes: [u8; DIGEST_SIZE],
}

impl Digest {
    /// Hashes the UTF-8 bytes of `text` followed by `salt`.
    #[must_use]
    pub fn new(text: &str, salt: &str) -> Self {
        let mut hasher = Sha512::new();
        hasher.update(text.as_bytes());
        hasher.update(salt.as_bytes());

        let mut bytes = [0u8; DIGEST_SIZE];
        bytes.copy_from_slice(&hasher.finalize());
        Self { bytes }
    }

    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes)
    }

    /// Compares against a base64 encoded digest in constant time.
    ///
    /// Malformed or wrongly sized input simply does not match.
    #[must_use]
    pub fn matches(&self, encoded: &str) -> bool {
        let Ok(expected) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        bool::from(self.bytes.as_slice().ct_eq(expected.as_slice()))
    }
}

/// Outcome of a hash operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashResult {
    hash: String,
    salt: String,
    execution_time_micros: f64,
}

impl HashResult {
    /// Base64 SHA-512 digest.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Base64 salt, empty when the hash is unsalted.
    #[must_use]
    pub fn salt(&self) -> &str {
        &self.salt
    }

    #[must_use]
    pub const fn execution_time_micros(&self) -> f64 {
        self.execution_time_micros
    }

    #[must_use]
    pub fn is_salted(&self) -> bool {
        !self.salt.is_empty()
    }
}

/// Hashes `text`, optionally mixing in a fresh random salt.
///
/// # Errors
///
/// * [`CipherError::InvalidArgument`] if `text` is empty or whitespace.
/// * [`CipherError::RandomSource`] if the salt cannot be generated.
pub fn hash(text: &str, use_salt: bool) -> Result<HashResult> {
    require_text("text", text)?;

    let started = Instant::now();
    let salt = if use_salt { generate_salt::<SALT_SIZE>()? } else { String::new() };
    let hash = Digest::new(text, &salt).to_base64();

    Ok(HashResult { hash, salt, execution_time_micros: started.elapsed().as_secs_f64() * 1_000_000.0 })
}

/// Checks `text` (plus `salt`, possibly empty) against a stored digest.
///
/// # Errors
///
/// Returns [`CipherError::InvalidArgument`] if `text` is empty or whitespace.
pub fn verify(text: &str, hash_value: &str, salt: &str) -> Result<bool> {
    require_text("text", text)?;
    Ok(Digest::new(text, salt).matches(hash_value))
}

pub(crate) fn require_text(argument: &'static str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(CipherError::invalid(argument, "cannot be empty or whitespace"));
    }
    Ok(())
}
