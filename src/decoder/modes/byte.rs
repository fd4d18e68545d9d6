use crate::error::QrError;

/// Byte mode decoder (Mode 0100) for 8-bit data
pub struct ByteDecoder;

impl ByteDecoder {
    /// Decode raw bytes; character-set interpretation is left to the
    /// caller (the declared ECI only labels the bytes).
    pub fn decode(bits: &[bool], character_count: usize) -> Result<(Vec<u8>, usize), QrError> {
        let mut bytes = Vec::with_capacity(character_count);
        let mut bit_idx = 0;

        for _ in 0..character_count {
            if bit_idx + 8 > bits.len() {
                return Err(QrError::TruncatedStream);
            }
            let mut byte: u8 = 0;
            for i in 0..8 {
                byte = (byte << 1) | (bits[bit_idx + i] as u8);
            }
            bytes.push(byte);
            bit_idx += 8;
        }

        Ok((bytes, bit_idx))
    }
}
