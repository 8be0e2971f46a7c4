//! Secure random material.
//!
//! Keys and IVs are handled as text by callers and turned into bytes with
//! UTF-8, so generated material is produced directly as base64 text of the
//! exact length the cipher needs: `n` characters are the encoding of
//! `n * 3 / 4` random bytes (n is always a multiple of 4, so no padding).
//!
//! The cost is entropy: a generated 256-bit key carries 192 random bits and a
//! generated IV 96. Callers that need full-entropy keys must bring their own.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::config::IV_SIZE;
use crate::error::{CipherError, Result};
use crate::types::KeySize;

/// Fills a fixed-size array from the operating system RNG.
///
/// # Errors
///
/// Returns [`CipherError::RandomSource`] if the OS RNG fails.
pub fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    fill(&mut bytes)?;
    Ok(bytes)
}

/// Base64 encoded random salt of `N` bytes.
pub fn generate_salt<const N: usize>() -> Result<String> {
    let bytes: [u8; N] = random_bytes()?;
    Ok(STANDARD.encode(bytes))
}

/// Random base64 text exactly `chars` characters long.
///
/// # Errors
///
/// Returns [`CipherError::InvalidArgument`] if `chars` is zero or not a
/// multiple of 4, and [`CipherError::RandomSource`] if the OS RNG fails.
pub fn random_text(chars: usize) -> Result<String> {
    if chars == 0 || !chars.is_multiple_of(4) {
        return Err(CipherError::invalid("chars", "length must be a positive multiple of 4"));
    }

    let mut bytes = vec![0u8; chars / 4 * 3];
    fill(&mut bytes)?;
    Ok(STANDARD.encode(&bytes))
}

/// Random key text with as many characters as `key_size` has bytes.
///
/// Holds [`KeySize::entropy_bits`] bits of entropy (192 for AES-256).
///
/// # Errors
///
/// Returns [`CipherError::RandomSource`] if the OS RNG fails.
pub fn generate_key(key_size: KeySize) -> Result<String> {
    random_text(key_size.bytes())
}

/// Random 16 character IV text, holding 96 bits of entropy.
///
/// # Errors
///
/// Returns [`CipherError::RandomSource`] if the OS RNG fails.
pub fn generate_iv() -> Result<String> {
    random_text(IV_SIZE)
}

fn fill(bytes: &mut [u8]) -> Result<()> {
    OsRng.try_fill_bytes(bytes).map_err(|e| CipherError::RandomSource { message: format!("os rng failed: {e}").into() })
}
