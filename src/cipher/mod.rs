//! # Block Cipher Layer
//!
//! Raw AES encryption in one of the supported chaining modes, with PKCS#7
//! padding applied around it.
//!
//! ## Architecture
//!
//! - **Mode Layer**: marker types ([`Cbc`], [`Ecb`], [`Cfb`]) implementing [`BlockMode`]
//! - **Dispatch Layer**: [`Cipher`] validates key/IV lengths once, pads, and routes
//!   to the mode selected by [`CipherMode`]
//!
//! The AES variant follows the raw key length: 16, 24 or 32 bytes select
//! AES-128, AES-192 or AES-256.

mod cbc;
mod cfb;
mod ecb;

use crate::config::{AES_KEY_SIZES, BLOCK_SIZE, IV_SIZE};
use crate::error::{CipherError, CryptoContext, Result};
use crate::padding::{PaddingError, Pkcs7Padding};
use crate::types::CipherMode;

/// Marker types for the chaining mode.
pub mod mode {
    /// Cipher block chaining.
    pub struct Cbc;
    /// Electronic codebook.
    pub struct Ecb;
    /// 128-bit cipher feedback.
    pub struct Cfb;
}

pub use mode::{Cbc, Cfb, Ecb};

/// Failures reported by a mode implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeError {
    KeyLength,
    IvLength,
    Unaligned,
}

/// A chaining mode over whole AES blocks.
///
/// Inputs are already padded to a multiple of [`BLOCK_SIZE`]; implementations
/// never add or strip padding themselves.
pub trait BlockMode {
    fn encrypt(key: &[u8], iv: &[u8], blocks: &[u8]) -> std::result::Result<Vec<u8>, ModeError>;

    fn decrypt(key: &[u8], iv: &[u8], blocks: &[u8]) -> std::result::Result<Vec<u8>, ModeError>;
}

/// Runs `$body` with `$aes` bound to the AES variant matching `$key_len`.
macro_rules! with_aes {
    ($key_len:expr, $aes:ident => $body:block) => {
        match $key_len {
            16 => {
                type $aes = aes::Aes128;
                $body
            }
            24 => {
                type $aes = aes::Aes192;
                $body
            }
            32 => {
                type $aes = aes::Aes256;
                $body
            }
            _ => Err($crate::cipher::ModeError::KeyLength),
        }
    };
}

pub(crate) use with_aes;

/// AES in a configured mode over borrowed key and IV bytes.
pub struct Cipher<'a> {
    key: &'a [u8],
    iv: &'a [u8],
    mode: CipherMode,
}

impl<'a> Cipher<'a> {
    /// Checks the key and IV lengths against the mode.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::CryptoFailure`] if the key is not 16, 24 or 32
    /// bytes long, or if the mode needs an IV and `iv` is not 16 bytes.
    pub fn new(key: &'a [u8], iv: &'a [u8], mode: CipherMode) -> Result<Self> {
        let cipher = Self { key, iv, mode };

        if !AES_KEY_SIZES.contains(&key.len()) {
            return Err(CipherError::crypto("unsupported aes key length", cipher.context()));
        }

        if mode.requires_iv() && iv.len() != IV_SIZE {
            return Err(CipherError::crypto("iv length does not match the cipher mode", cipher.context()));
        }

        Ok(cipher)
    }

    #[inline]
    pub fn context(&self) -> CryptoContext {
        CryptoContext { mode: self.mode, key_len: self.key.len(), iv_len: self.iv.len() }
    }

    /// Pads and encrypts `plaintext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let padded = Pkcs7Padding::pad(plaintext).map_err(|e| self.padding_failure(e))?;

        let result = match self.mode {
            CipherMode::Cbc => Cbc::encrypt(self.key, self.iv, &padded),
            CipherMode::Ecb => Ecb::encrypt(self.key, self.iv, &padded),
            CipherMode::Cfb => Cfb::encrypt(self.key, self.iv, &padded),
        };

        result.map_err(|e| self.mode_failure(e))
    }

    /// Decrypts `ciphertext` and strips its padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(BLOCK_SIZE) {
            return Err(self.mode_failure(ModeError::Unaligned));
        }

        let result = match self.mode {
            CipherMode::Cbc => Cbc::decrypt(self.key, self.iv, ciphertext),
            CipherMode::Ecb => Ecb::decrypt(self.key, self.iv, ciphertext),
            CipherMode::Cfb => Cfb::decrypt(self.key, self.iv, ciphertext),
        };

        let padded = result.map_err(|e| self.mode_failure(e))?;
        Pkcs7Padding::unpad(&padded).map_err(|e| self.padding_failure(e))
    }

    fn mode_failure(&self, error: ModeError) -> CipherError {
        let message = match error {
            ModeError::KeyLength => "unsupported aes key length",
            ModeError::IvLength => "iv length does not match the cipher mode",
            ModeError::Unaligned => "ciphertext length is not a multiple of the block size",
        };
        CipherError::crypto(message, self.context())
    }

    fn padding_failure(&self, error: PaddingError) -> CipherError {
        CipherError::crypto(error.to_string(), self.context())
    }
}
