//! Common type definitions for cipherkit.
//!
//! Provides the enums that describe how a [`CipherEngine`](crate::engine::CipherEngine)
//! is configured.
//!
//! # Overview
//!
//! - [`CipherMode`]: Block chaining mode applied around AES
//! - [`KeySize`]: Nominal key size used when generating random keys

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Block chaining mode used by an engine.
///
/// Every mode runs AES over 16-byte blocks with PKCS#7 padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum CipherMode {
    /// Cipher block chaining. Requires a 16-byte IV.
    #[default]
    Cbc,

    /// Electronic codebook. The IV is ignored.
    Ecb,

    /// Cipher feedback with a full 128-bit segment. Requires a 16-byte IV.
    Cfb,
}

impl CipherMode {
    /// Returns whether this mode consumes an initialization vector.
    #[inline]
    pub const fn requires_iv(self) -> bool {
        matches!(self, Self::Cbc | Self::Cfb)
    }
}

/// Nominal key size in bits.
///
/// Only used when generating random key material. Caller-supplied keys are
/// not checked against it; the AES variant is picked from the raw key length.
///
/// The size is the AES key length. Generated keys are base64 text of that many
/// characters, so they carry 3/4 of it as entropy ([`KeySize::entropy_bits`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum KeySize {
    #[strum(serialize = "128")]
    Bits128,

    #[strum(serialize = "192")]
    Bits192,

    #[default]
    #[strum(serialize = "256")]
    Bits256,
}

impl KeySize {
    #[inline]
    pub const fn bits(self) -> usize {
        match self {
            Self::Bits128 => 128,
            Self::Bits192 => 192,
            Self::Bits256 => 256,
        }
    }

    #[inline]
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }

    /// Random bits in a generated key of this size: 96, 144 or 192.
    #[inline]
    pub const fn entropy_bits(self) -> usize {
        self.bits() / 4 * 3
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_cipher_mode_default_is_cbc() {
        assert_eq!(CipherMode::default(), CipherMode::Cbc);
    }

    #[test]
    fn test_cipher_mode_parse_case_insensitive() {
        assert_eq!(CipherMode::from_str("cbc").unwrap(), CipherMode::Cbc);
        assert_eq!(CipherMode::from_str("Ecb").unwrap(), CipherMode::Ecb);
        assert_eq!(CipherMode::from_str("CFB").unwrap(), CipherMode::Cfb);
        assert!(CipherMode::from_str("gcm").is_err());
    }

    #[test]
    fn test_cipher_mode_display() {
        assert_eq!(CipherMode::Cbc.to_string(), "CBC");
        assert_eq!(CipherMode::Cfb.as_ref(), "CFB");
    }

    #[test]
    fn test_requires_iv() {
        let needing: Vec<_> = CipherMode::iter().filter(|mode| mode.requires_iv()).collect();
        assert_eq!(needing, vec![CipherMode::Cbc, CipherMode::Cfb]);
    }

    #[test]
    fn test_key_size() {
        assert_eq!(KeySize::default(), KeySize::Bits256);
        assert_eq!(KeySize::Bits192.bytes(), 24);
        assert_eq!(KeySize::from_str("128").unwrap(), KeySize::Bits128);
        assert_eq!(KeySize::Bits256.to_string(), "256");
    }
}
