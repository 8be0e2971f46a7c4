//! # Errors
//!
//! Defines [`CipherError`] and the crate-wide [`Result`] alias. Error messages only
//! ever carry structural metadata (lengths, modes, registry names), never key,
//! IV, plaintext or ciphertext content.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use crate::types::CipherMode;

pub type Result<T> = std::result::Result<T, CipherError>;

/// Structural description of the configuration an operation ran under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CryptoContext {
    pub mode: CipherMode,
    pub key_len: usize,
    pub iv_len: usize,
}

impl Display for CryptoContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "mode={}, key_len={}, iv_len={}", self.mode, self.key_len, self.iv_len)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    /// A required input was missing, empty or malformed.
    #[error("invalid argument `{argument}`: {message}")]
    InvalidArgument { argument: &'static str, message: Cow<'static, str> },

    /// The codec refused to turn a value into text.
    ///
    /// Codecs describe the failure by kind and position only, never by the
    /// value content.
    #[error("value of type `{type_name}` is not serializable: {message}")]
    NonSerializable { type_name: &'static str, message: Cow<'static, str> },

    /// The codec could not rebuild a value from decrypted text.
    #[error("failed to deserialize `{type_name}`: {message}")]
    Deserialization { type_name: &'static str, message: Cow<'static, str> },

    /// The cipher or digest primitive rejected the operation.
    ///
    /// Bad padding, malformed base64 and key/IV lengths that do not fit the
    /// mode all land here and should be treated as corruption or tampering.
    #[error("crypto failure ({context}): {message}")]
    CryptoFailure { message: Cow<'static, str>, context: CryptoContext },

    /// The operating system RNG could not supply random bytes.
    #[error("random source failure: {message}")]
    RandomSource { message: Cow<'static, str> },

    #[error("an engine named `{name}` is already registered")]
    DuplicateName { name: String },

    #[error("no engine named `{name}` is registered")]
    NotFound { name: String },
}

impl CipherError {
    pub(crate) fn invalid(argument: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument { argument, message: message.into() }
    }

    pub(crate) fn crypto(message: impl Into<Cow<'static, str>>, context: CryptoContext) -> Self {
        Self::CryptoFailure { message: message.into(), context }
    }

    /// Programming misuse: reject at input validation.
    #[must_use]
    pub const fn is_misuse(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::NonSerializable { .. })
    }

    /// Data integrity failure: treat as tamper or corruption evidence.
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(self, Self::CryptoFailure { .. } | Self::Deserialization { .. })
    }

    /// Registry naming conflict: retry with a different name.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateName { .. } | Self::NotFound { .. })
    }
}
