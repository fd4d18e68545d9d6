use crate::error::QrError;

/// Kanji mode decoder (Mode 1000)
/// Each character is 13 bits, unpacked back to its Shift-JIS byte pair.
pub struct KanjiDecoder;

impl KanjiDecoder {
    pub fn decode(bits: &[bool], character_count: usize) -> Result<(Vec<u8>, usize), QrError> {
        let mut bytes = Vec::with_capacity(character_count * 2);
        let mut bit_idx = 0;

        for _ in 0..character_count {
            if bit_idx + 13 > bits.len() {
                return Err(QrError::TruncatedStream);
            }
            let mut packed: u32 = 0;
            for i in 0..13 {
                packed = (packed << 1) | (bits[bit_idx + i] as u32);
            }

            let sub = (packed / 0xC0) << 8 | (packed % 0xC0);
            let word = if sub < 0x1F00 {
                sub + 0x8140
            } else {
                sub + 0xC140
            };
            let in_range =
                (0x8140..=0x9FFC).contains(&word) || (0xE040..=0xEBBF).contains(&word);
            if !in_range {
                return Err(QrError::InvalidInput(format!(
                    "kanji value {:#06x} outside the Shift-JIS ranges",
                    word
                )));
            }

            bytes.push((word >> 8) as u8);
            bytes.push((word & 0xFF) as u8);
            bit_idx += 13;
        }

        Ok((bytes, bit_idx))
    }
}
