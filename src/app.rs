use anyhow::{Context, Result};
use cipherkit::config::{APP_NAME, EnvSource};
use cipherkit::{CipherEngine, CipherMode, EngineOptions, KeySize, LogLevels, random};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt text and print base64 ciphertext.
    Encrypt {
        #[arg(short, long)]
        key: String,

        /// IV text (16 characters). Generated and printed when omitted.
        #[arg(short, long)]
        iv: Option<String>,

        #[arg(short, long, default_value = "cbc")]
        mode: CipherMode,

        text: String,
    },

    /// Decrypt base64 ciphertext.
    Decrypt {
        #[arg(short, long)]
        key: String,

        #[arg(short, long)]
        iv: Option<String>,

        #[arg(short, long, default_value = "cbc")]
        mode: CipherMode,

        text: String,
    },

    /// Hash text with SHA-512.
    Hash {
        /// Mix a random salt into the hash.
        #[arg(short, long)]
        salt: bool,

        text: String,
    },

    /// Check text against a stored hash and salt.
    Verify {
        #[arg(long)]
        hash: String,

        #[arg(short, long, default_value = "")]
        salt: String,

        text: String,
    },

    /// Print a random key and IV.
    Keygen {
        #[arg(short = 'b', long, default_value = "256")]
        key_size: KeySize,
    },
}

#[derive(Parser)]
#[command(name = APP_NAME, version, about = "Encrypt text with AES (CBC/ECB/CFB) and hash it with salted SHA-512.")]
pub struct App {
    #[command(subcommand)]
    command: Commands,
}

impl App {
    pub fn init() -> Result<Self> {
        let levels = LogLevels::from_source(&EnvSource);
        let subscriber = tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(max_level(levels)).finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(Self::parse())
    }

    pub async fn execute(self) -> Result<()> {
        let options = EngineOptions::from_source(&EnvSource);

        match self.command {
            Commands::Encrypt { key, iv, mode, text } => {
                let engine = CipherEngine::with_options(&key, iv.as_deref(), options.with_mode(mode))?;
                let ciphertext = engine.encrypt_string_async(&text).await.context("encryption failed")?;
                println!("{ciphertext}");
                if iv.is_none() && let Some(iv) = engine.iv() {
                    println!("iv: {iv}");
                }
            }
            Commands::Decrypt { key, iv, mode, text } => {
                let engine = CipherEngine::with_options(&key, iv.as_deref(), options.with_mode(mode))?;
                println!("{}", engine.decrypt_string_async(&text).await.context("decryption failed")?);
            }
            Commands::Hash { salt, text } => {
                let result = cipherkit::hash::hash(&text, salt)?;
                println!("hash: {}", result.hash());
                if result.is_salted() {
                    println!("salt: {}", result.salt());
                }
                println!("time: {:.1}µs", result.execution_time_micros());
            }
            Commands::Verify { hash, salt, text } => {
                if !cipherkit::hash::verify(&text, &hash, &salt)? {
                    anyhow::bail!("hash does not match");
                }
                println!("✓ hash matches");
            }
            Commands::Keygen { key_size } => {
                println!("key: {}", random::generate_key(key_size)?);
                println!("iv: {}", random::generate_iv()?);
            }
        }

        Ok(())
    }
}

fn max_level(levels: LogLevels) -> LevelFilter {
    if levels.contains(LogLevels::TRACE) {
        LevelFilter::TRACE
    } else if levels.contains(LogLevels::DEBUG) {
        LevelFilter::DEBUG
    } else if levels.contains(LogLevels::INFORMATION) {
        LevelFilter::INFO
    } else if levels.contains(LogLevels::WARNING) {
        LevelFilter::WARN
    } else if levels.intersects(LogLevels::ERROR | LogLevels::FATAL) {
        LevelFilter::ERROR
    } else {
        LevelFilter::OFF
    }
}
