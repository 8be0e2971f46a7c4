//! # Cipher Engine
//!
//! A [`CipherEngine`] owns one key, an optional IV and a chaining mode, and exposes
//! string encryption, decryption, hashing and verification on top of them.
//!
//! ## Key and IV Text
//!
//! Keys and IVs are passed as text and used as their UTF-8 bytes. A 32 character
//! key therefore selects AES-256, and CBC/CFB need a 16 character IV. IV text
//! shorter than 16 characters counts as no IV at all.
//!
//! ## Lazy IV
//!
//! Encrypting in a mode that needs an IV while none is configured generates one
//! and stores it in the engine. Read it back with [`CipherEngine::iv`] before
//! dropping the engine, otherwise the ciphertext cannot be decrypted again.
//!
//! ## Sharing
//!
//! Configuration sits behind an internal read/write lock. Every operation works
//! on one consistent snapshot, so an engine can be shared freely (for example
//! through the [`EngineRegistry`](crate::registry::EngineRegistry)). Prefer
//! [`CipherEngine::with_iv`] over [`CipherEngine::set_iv`] when a different IV
//! is needed: it leaves the shared engine untouched.

mod asynchronous;
mod object;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cipher::Cipher;
use crate::config::{ConfigSource, IV_SIZE, MIN_IV_CHARS};
use crate::error::{CipherError, CryptoContext, Result};
use crate::hash::{self, HashResult, require_text};
use crate::logging::{LogLevels, log_event};
use crate::random;
use crate::secret::SecretBytes;
use crate::types::{CipherMode, KeySize};

/// Construction-time settings of an engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub mode: CipherMode,
    pub key_size: KeySize,
    pub log_levels: LogLevels,
}

impl EngineOptions {
    /// Default options with log levels taken from `source`.
    #[must_use]
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self { log_levels: LogLevels::from_source(source), ..Self::default() }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: CipherMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_key_size(mut self, key_size: KeySize) -> Self {
        self.key_size = key_size;
        self
    }

    #[must_use]
    pub const fn with_log_levels(mut self, log_levels: LogLevels) -> Self {
        self.log_levels = log_levels;
        self
    }
}

struct EngineState {
    key: SecretBytes,
    iv: Option<SecretBytes>,
}

impl EngineState {
    fn iv_bytes(&self) -> &[u8] {
        self.iv.as_ref().map_or(&[], SecretBytes::expose_secret)
    }
}

pub struct CipherEngine {
    state: RwLock<EngineState>,
    options: EngineOptions,
}

impl CipherEngine {
    /// Creates an engine in CBC mode with default options.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidArgument`] if `key` is empty or whitespace.
    pub fn new(key: &str, iv: Option<&str>) -> Result<Self> {
        Self::with_options(key, iv, EngineOptions::default())
    }

    /// Creates an engine with explicit options.
    ///
    /// The key length is not checked against the mode here; a key AES cannot
    /// use surfaces as [`CipherError::CryptoFailure`] on the first operation.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidArgument`] if `key` is empty or whitespace.
    pub fn with_options(key: &str, iv: Option<&str>, options: EngineOptions) -> Result<Self> {
        require_text("key", key)?;

        let state = EngineState { key: SecretBytes::from_text(key), iv: iv.and_then(parse_iv) };
        log_event!(options.log_levels, DEBUG, mode = %options.mode, key_len = state.key.len(), iv_len = state.iv_bytes().len(), "cipher engine created");

        Ok(Self { state: RwLock::new(state), options })
    }

    /// Returns a new engine with the same key and options and a different IV.
    #[must_use]
    pub fn with_iv(&self, iv: Option<&str>) -> Self {
        let state = self.state.read();
        let derived = EngineState { key: state.key.clone(), iv: iv.and_then(parse_iv) };
        Self { state: RwLock::new(derived), options: self.options }
    }

    #[inline]
    pub const fn mode(&self) -> CipherMode {
        self.options.mode
    }

    #[inline]
    pub const fn key_size(&self) -> KeySize {
        self.options.key_size
    }

    #[inline]
    pub const fn options(&self) -> EngineOptions {
        self.options
    }

    /// Current IV text, if one is configured or has been generated.
    #[must_use]
    pub fn iv(&self) -> Option<String> {
        self.state.read().iv.as_ref().map(|iv| String::from_utf8_lossy(iv.expose_secret()).into_owned())
    }

    #[must_use]
    pub fn has_iv(&self) -> bool {
        self.state.read().iv.is_some()
    }

    /// Replaces the IV. Text shorter than 16 characters clears it.
    pub fn set_iv(&self, iv: &str) {
        self.state.write().iv = parse_iv(iv);
    }

    /// Clears the IV; the next encryption generates a new one.
    pub fn clear_iv(&self) {
        self.state.write().iv = None;
    }

    /// Generates a random 16 character IV, storing it when `persist` is set.
    ///
    /// The IV is base64 text, so it carries 96 random bits.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RandomSource`] if the OS RNG fails.
    pub fn generate_random_iv(&self, persist: bool) -> Result<String> {
        let iv = self.generated("generate_iv", random::generate_iv)?;
        if persist {
            self.state.write().iv = Some(SecretBytes::from_text(&iv));
            log_event!(self.options.log_levels, DEBUG, iv_len = IV_SIZE, "random iv persisted");
        }
        Ok(iv)
    }

    /// Generates a random key sized by [`KeySize`], storing it when `persist` is set.
    ///
    /// The key is base64 text with one character per key byte, so it carries
    /// [`KeySize::entropy_bits`] random bits (192 for AES-256).
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RandomSource`] if the OS RNG fails.
    pub fn generate_random_key(&self, persist: bool) -> Result<String> {
        let key = self.generated("generate_key", || random::generate_key(self.options.key_size))?;
        if persist {
            self.state.write().key = SecretBytes::from_text(&key);
            log_event!(self.options.log_levels, DEBUG, key_len = key.len(), "random key persisted");
        }
        Ok(key)
    }

    /// Encrypts `plaintext` and returns base64 ciphertext.
    ///
    /// Deterministic for a fixed key, IV and mode. When the mode needs an IV and
    /// none is configured, one is generated and stored first.
    ///
    /// # Errors
    ///
    /// * [`CipherError::InvalidArgument`] if `plaintext` is empty or whitespace.
    /// * [`CipherError::CryptoFailure`] if the key or IV does not fit the mode.
    /// * [`CipherError::RandomSource`] if an IV has to be generated and the RNG fails.
    pub fn encrypt_string(&self, plaintext: &str) -> Result<String> {
        require_text("plaintext", plaintext)?;

        let state = self.state_with_iv()?;
        let ciphertext = Cipher::new(state.key.expose_secret(), state.iv_bytes(), self.options.mode)
            .and_then(|cipher| cipher.encrypt(plaintext.as_bytes()))
            .inspect_err(|e| self.log_failure("encrypt", e))?;

        log_event!(self.options.log_levels, TRACE, mode = %self.options.mode, plaintext_len = plaintext.len(), ciphertext_len = ciphertext.len(), "encrypted string");
        Ok(STANDARD.encode(ciphertext))
    }

    /// Decrypts base64 ciphertext produced by [`CipherEngine::encrypt_string`].
    ///
    /// # Errors
    ///
    /// * [`CipherError::InvalidArgument`] if `ciphertext` is empty or whitespace.
    /// * [`CipherError::CryptoFailure`] if the input is not base64, the padding
    ///   is invalid, the key/IV do not fit the mode, or the result is not UTF-8.
    pub fn decrypt_string(&self, ciphertext: &str) -> Result<String> {
        require_text("ciphertext", ciphertext)?;

        let state = self.state.read();
        let context = self.context(&state);

        let bytes = STANDARD.decode(ciphertext.trim()).map_err(|_| CipherError::crypto("ciphertext is not valid base64", context));
        let plaintext = bytes
            .and_then(|bytes| Cipher::new(state.key.expose_secret(), state.iv_bytes(), self.options.mode)?.decrypt(&bytes))
            .and_then(|plaintext| String::from_utf8(plaintext).map_err(|_| CipherError::crypto("decrypted bytes are not valid utf-8", context)))
            .inspect_err(|e| self.log_failure("decrypt", e))?;

        log_event!(self.options.log_levels, TRACE, mode = %self.options.mode, plaintext_len = plaintext.len(), "decrypted string");
        Ok(plaintext)
    }

    /// SHA-512 hash of `text`, salted with 16 random bytes when `use_salt` is set.
    ///
    /// # Errors
    ///
    /// * [`CipherError::InvalidArgument`] if `text` is empty or whitespace.
    /// * [`CipherError::RandomSource`] if a salt cannot be generated.
    pub fn hash(&self, text: &str, use_salt: bool) -> Result<HashResult> {
        let result = hash::hash(text, use_salt).inspect_err(|e| self.log_failure("hash", e))?;
        log_event!(self.options.log_levels, TRACE, salted = use_salt, micros = result.execution_time_micros(), "hashed text");
        Ok(result)
    }

    /// Recomputes the hash of `text + salt` and compares it in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidArgument`] if `text` is empty or whitespace.
    pub fn verify(&self, text: &str, hash_value: &str, salt: &str) -> Result<bool> {
        let verified = hash::verify(text, hash_value, salt).inspect_err(|e| self.log_failure("verify", e))?;
        if !verified {
            log_event!(self.options.log_levels, WARNING, salted = !salt.is_empty(), "hash verification failed");
        }
        Ok(verified)
    }

    /// Read guard over a state that has an IV whenever the mode needs one.
    fn state_with_iv(&self) -> Result<RwLockReadGuard<'_, EngineState>> {
        let state = self.state.read();
        if state.iv.is_some() || !self.options.mode.requires_iv() {
            return Ok(state);
        }
        drop(state);

        let mut state = self.state.write();
        // Another caller may have generated it between the two locks.
        if state.iv.is_none() {
            let iv = self.generated("encrypt", random::generate_iv)?;
            state.iv = Some(SecretBytes::from_text(&iv));
            log_event!(self.options.log_levels, INFORMATION, mode = %self.options.mode, iv_len = IV_SIZE, "generated missing iv");
        }
        Ok(RwLockWriteGuard::downgrade(state))
    }

    fn generated(&self, operation: &'static str, generator: impl FnOnce() -> Result<String>) -> Result<String> {
        generator().inspect_err(|e| self.log_failure(operation, e))
    }

    fn context(&self, state: &EngineState) -> CryptoContext {
        CryptoContext { mode: self.options.mode, key_len: state.key.len(), iv_len: state.iv_bytes().len() }
    }

    fn log_failure(&self, operation: &'static str, error: &CipherError) {
        match error {
            CipherError::CryptoFailure { context, .. } => {
                log_event!(self.options.log_levels, ERROR, operation, mode = %context.mode, key_len = context.key_len, iv_len = context.iv_len, "{error}");
            }
            CipherError::RandomSource { .. } => {
                log_event!(self.options.log_levels, FATAL, operation, "{error}");
            }
            _ => {
                log_event!(self.options.log_levels, WARNING, operation, "{error}");
            }
        }
    }
}

impl std::fmt::Debug for CipherEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("CipherEngine")
            .field("mode", &self.options.mode)
            .field("key_size", &self.options.key_size)
            .field("key_len", &state.key.len())
            .field("iv_len", &state.iv_bytes().len())
            .finish()
    }
}

impl Drop for CipherEngine {
    fn drop(&mut self) {
        // Key and IV buffers zeroize themselves.
        log_event!(self.options.log_levels, TRACE, mode = %self.options.mode, "cipher engine disposed");
    }
}

fn parse_iv(iv: &str) -> Option<SecretBytes> {
    (iv.chars().count() >= MIN_IV_CHARS).then(|| SecretBytes::from_text(iv))
}
