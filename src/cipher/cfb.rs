use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};

use super::{BlockMode, Cfb, ModeError, with_aes};

impl BlockMode for Cfb {
    fn encrypt(key: &[u8], iv: &[u8], blocks: &[u8]) -> Result<Vec<u8>, ModeError> {
        with_aes!(key.len(), Aes => {
            let encryptor = cfb_mode::Encryptor::<Aes>::new_from_slices(key, iv).map_err(|_| ModeError::IvLength)?;
            let mut buffer = blocks.to_vec();
            encryptor.encrypt(&mut buffer);
            Ok(buffer)
        })
    }

    fn decrypt(key: &[u8], iv: &[u8], blocks: &[u8]) -> Result<Vec<u8>, ModeError> {
        with_aes!(key.len(), Aes => {
            let decryptor = cfb_mode::Decryptor::<Aes>::new_from_slices(key, iv).map_err(|_| ModeError::IvLength)?;
            let mut buffer = blocks.to_vec();
            decryptor.decrypt(&mut buffer);
            Ok(buffer)
        })
    }
}
