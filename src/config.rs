//! Global Configuration
//!
//! Constants shared across the crate and the external key-value source that
//! may supply settings at construction time.
//!
//! ## Security Considerations
//!
//! - Salt length gives 128 bits of randomness per salted hash
//! - Generated IVs and keys come from the operating system RNG
//! - Configuration values read from the environment never include key material

/// Application name used by the binary.
pub const APP_NAME: &str = "cipherkit";

/// AES block size in bytes, shared by every supported mode.
pub const BLOCK_SIZE: usize = 16;

/// Length of the IV consumed by CBC and CFB.
pub const IV_SIZE: usize = 16;

/// IV strings shorter than this are treated as absent and generated lazily.
pub const MIN_IV_CHARS: usize = 16;

/// Number of random bytes mixed into a salted hash.
///
/// The salt is stored base64 encoded (24 characters) next to the digest.
pub const SALT_SIZE: usize = 16;

/// Size of a SHA-512 digest in bytes.
pub const DIGEST_SIZE: usize = 64;

/// Raw key lengths accepted by AES (128, 192 and 256 bits).
pub const AES_KEY_SIZES: &[usize] = &[16, 24, 32];

/// Configuration key holding the active logging levels.
///
/// Accepts level names separated by `,` or `|`, e.g. `Error,Fatal`.
pub const LOG_LEVELS_KEY: &str = "CIPHERKIT_LOG_LEVELS";

/// External key-value configuration source.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads configuration from process environment variables.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory source, handy for tests and embedding applications.
#[derive(Clone, Debug, Default)]
pub struct MapSource {
    values: hashbrown::HashMap<String, String>,
}

impl MapSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
