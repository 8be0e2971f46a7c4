//! Async counterparts of the engine operations.
//!
//! Each one yields to the scheduler once and then runs the synchronous
//! operation on the current task. The work is short and CPU-bound, there is no
//! I/O inside, and an operation cannot be cancelled once it has resumed.

use tokio::task::yield_now;

use super::CipherEngine;
use crate::codec::{ObjectDecoder, ObjectEncoder};
use crate::error::Result;
use crate::hash::HashResult;

impl CipherEngine {
    pub async fn generate_random_iv_async(&self, persist: bool) -> Result<String> {
        yield_now().await;
        self.generate_random_iv(persist)
    }

    pub async fn generate_random_key_async(&self, persist: bool) -> Result<String> {
        yield_now().await;
        self.generate_random_key(persist)
    }

    pub async fn encrypt_string_async(&self, plaintext: &str) -> Result<String> {
        yield_now().await;
        self.encrypt_string(plaintext)
    }

    pub async fn decrypt_string_async(&self, ciphertext: &str) -> Result<String> {
        yield_now().await;
        self.decrypt_string(ciphertext)
    }

    pub async fn encrypt_object_async<T: ?Sized, C>(&self, value: &T, codec: &C) -> Result<String>
    where
        C: ObjectEncoder<T>,
    {
        yield_now().await;
        self.encrypt_object(value, codec)
    }

    pub async fn decrypt_object_async<T, C>(&self, ciphertext: &str, codec: &C) -> Result<T>
    where
        C: ObjectDecoder<T>,
    {
        yield_now().await;
        self.decrypt_object(ciphertext, codec)
    }

    pub async fn hash_async(&self, text: &str, use_salt: bool) -> Result<HashResult> {
        yield_now().await;
        self.hash(text, use_salt)
    }

    pub async fn hash_object_async<T: ?Sized, C>(&self, value: &T, codec: &C, use_salt: bool) -> Result<HashResult>
    where
        C: ObjectEncoder<T>,
    {
        yield_now().await;
        self.hash_object(value, codec, use_salt)
    }

    pub async fn verify_async(&self, text: &str, hash_value: &str, salt: &str) -> Result<bool> {
        yield_now().await;
        self.verify(text, hash_value, salt)
    }

    pub async fn verify_object_async<T: ?Sized, C>(&self, value: &T, codec: &C, hash_value: &str, salt: &str) -> Result<bool>
    where
        C: ObjectEncoder<T>,
    {
        yield_now().await;
        self.verify_object(value, codec, hash_value, salt)
    }
}
