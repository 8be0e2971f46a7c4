//! cipherkit - AES string/object encryption and salted SHA-512 hashing.
//!
//! A small library built around three pieces:
//! - [`CipherEngine`]: one key, an optional IV and a chaining mode (CBC, ECB, CFB)
//!   with encrypt/decrypt/hash/verify over strings and serde values
//! - [`EngineRegistry`]: a concurrent, case-insensitive cache of named engines
//! - [`ObjectEncoder`] / [`ObjectDecoder`]: the text codec object operations go through ([`JsonCodec`] by default)
//!
//! Ciphertext, digests and salts are base64 text. Key and IV material is
//! zeroized when an engine is dropped.
//!
//! ```no_run
//! use cipherkit::{CipherEngine, EngineRegistry, CipherMode, LogLevels};
//!
//! # fn main() -> cipherkit::Result<()> {
//! let registry = EngineRegistry::new(LogLevels::default());
//! registry.add("tokens", "$#%&(kjh565&*IKJ$#%&(kjh565&*IKJ", Some("1234567887654321"), CipherMode::Cbc)?;
//!
//! let engine = registry.require("TOKENS")?;
//! let ciphertext = engine.encrypt_string("ShortText")?;
//! assert_eq!(ciphertext, "fz1sHNfZi2HaotBkQYthUQ==");
//!
//! let hashed = engine.hash("ThisIs@Pas$wurd", true)?;
//! assert!(engine.verify("ThisIs@Pas$wurd", hashed.hash(), hashed.salt())?);
//! # Ok(())
//! # }
//! ```

pub mod cipher;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod hash;
pub mod logging;
pub mod padding;
pub mod random;
pub mod registry;
pub mod secret;
pub mod types;

pub use codec::{JsonCodec, ObjectCodec, ObjectDecoder, ObjectEncoder};
pub use engine::{CipherEngine, EngineOptions};
pub use error::{CipherError, CryptoContext, Result};
pub use hash::HashResult;
pub use logging::LogLevels;
pub use registry::EngineRegistry;
pub use types::{CipherMode, KeySize};
