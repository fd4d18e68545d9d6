use crate::error::QrError;

/// Numeric mode decoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode `character_count` digits from the bit slice.
    /// Returns (decoded_string, bits_consumed).
    pub fn decode(bits: &[bool], character_count: usize) -> Result<(String, usize), QrError> {
        let mut result = String::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let bits_needed = [0, 4, 7, 10][group_size];
            if bit_idx + bits_needed > bits.len() {
                return Err(QrError::TruncatedStream);
            }

            let mut value: u16 = 0;
            for i in 0..bits_needed {
                value = (value << 1) | (bits[bit_idx + i] as u16);
            }
            if value >= [0, 10, 100, 1000][group_size] {
                return Err(QrError::InvalidInput(format!(
                    "numeric group value {} exceeds {} digits",
                    value, group_size
                )));
            }

            match group_size {
                3 => result.push_str(&format!("{:03}", value)),
                2 => result.push_str(&format!("{:02}", value)),
                _ => result.push_str(&format!("{}", value)),
            }
            bit_idx += bits_needed;
            chars_remaining -= group_size;
        }

        Ok((result, bit_idx))
    }
}
