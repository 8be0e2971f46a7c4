use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use super::{BlockMode, Cbc, ModeError, with_aes};

impl BlockMode for Cbc {
    fn encrypt(key: &[u8], iv: &[u8], blocks: &[u8]) -> Result<Vec<u8>, ModeError> {
        with_aes!(key.len(), Aes => {
            let encryptor = cbc::Encryptor::<Aes>::new_from_slices(key, iv).map_err(|_| ModeError::IvLength)?;
            Ok(encryptor.encrypt_padded_vec_mut::<NoPadding>(blocks))
        })
    }

    fn decrypt(key: &[u8], iv: &[u8], blocks: &[u8]) -> Result<Vec<u8>, ModeError> {
        with_aes!(key.len(), Aes => {
            let decryptor = cbc::Decryptor::<Aes>::new_from_slices(key, iv).map_err(|_| ModeError::IvLength)?;
            decryptor.decrypt_padded_vec_mut::<NoPadding>(blocks).map_err(|_| ModeError::Unaligned)
        })
    }
}
