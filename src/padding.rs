//! PKCS#7 padding over the 16-byte AES block.
//!
//! Padding is applied before the block mode runs, so every mode sees whole
//! blocks and a full padding block is appended when the input is aligned.

use block_padding::array::Array;
use block_padding::array::typenum::{U16, Unsigned};
use block_padding::{PaddedData, Padding, Pkcs7};

use crate::config::BLOCK_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PaddingError {
    #[error("padded data length {0} is not a positive multiple of the block size")]
    Length(usize),

    #[error("invalid padding bytes")]
    Malformed,
}

pub struct Pkcs7Padding;

impl Pkcs7Padding {
    pub fn pad(data: &[u8]) -> Result<Vec<u8>, PaddingError> {
        let total_len = (data.len() / BLOCK_SIZE + 1) * BLOCK_SIZE;
        let mut result = Vec::with_capacity(total_len);

        match Pkcs7::pad_detached::<U16>(data) {
            PaddedData::Pad { blocks, tail_block } => {
                for block in blocks {
                    result.extend_from_slice(block.as_slice());
                }
                result.extend_from_slice(tail_block.as_slice());
            }
            PaddedData::NoPad { blocks } => {
                for block in blocks {
                    result.extend_from_slice(block.as_slice());
                }
            }
            PaddedData::Error => return Err(PaddingError::Malformed),
        }

        Ok(result)
    }

    pub fn unpad(data: &[u8]) -> Result<Vec<u8>, PaddingError> {
        if data.is_empty() || !data.len().is_multiple_of(U16::USIZE) {
            return Err(PaddingError::Length(data.len()));
        }

        let blocks: Vec<Array<u8, U16>> = data
            .chunks_exact(U16::USIZE)
            .map(|chunk| {
                let mut block = Array::default();
                block.copy_from_slice(chunk);
                block
            })
            .collect();

        Pkcs7::unpad_blocks::<U16>(&blocks).map(<[u8]>::to_vec).map_err(|_| PaddingError::Malformed)
    }
}
