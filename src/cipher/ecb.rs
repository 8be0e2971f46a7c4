use ecb::cipher::block_padding::NoPadding;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};

use super::{BlockMode, Ecb, ModeError, with_aes};

// ECB has no chaining state, the IV is accepted and ignored.
impl BlockMode for Ecb {
    fn encrypt(key: &[u8], _iv: &[u8], blocks: &[u8]) -> Result<Vec<u8>, ModeError> {
        with_aes!(key.len(), Aes => {
            let encryptor = ecb::Encryptor::<Aes>::new_from_slice(key).map_err(|_| ModeError::KeyLength)?;
            Ok(encryptor.encrypt_padded_vec_mut::<NoPadding>(blocks))
        })
    }

    fn decrypt(key: &[u8], _iv: &[u8], blocks: &[u8]) -> Result<Vec<u8>, ModeError> {
        with_aes!(key.len(), Aes => {
            let decryptor = ecb::Decryptor::<Aes>::new_from_slice(key).map_err(|_| ModeError::KeyLength)?;
            decryptor.decrypt_padded_vec_mut::<NoPadding>(blocks).map_err(|_| ModeError::Unaligned)
        })
    }
}
