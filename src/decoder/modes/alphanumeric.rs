use crate::encoder::modes::ALPHANUMERIC_CHARSET;
use crate::error::QrError;

/// Alphanumeric mode decoder (Mode 0010)
/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    pub fn decode(bits: &[bool], character_count: usize) -> Result<(String, usize), QrError> {
        let mut result = String::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            if chars_remaining >= 2 {
                if bit_idx + 11 > bits.len() {
                    return Err(QrError::TruncatedStream);
                }
                let mut value: u16 = 0;
                for i in 0..11 {
                    value = (value << 1) | (bits[bit_idx + i] as u16);
                }
                if value >= 45 * 45 {
                    return Err(QrError::InvalidInput(format!(
                        "alphanumeric pair value {} out of range",
                        value
                    )));
                }
                result.push(ALPHANUMERIC_CHARSET[(value / 45) as usize] as char);
                result.push(ALPHANUMERIC_CHARSET[(value % 45) as usize] as char);
                bit_idx += 11;
                chars_remaining -= 2;
            } else {
                if bit_idx + 6 > bits.len() {
                    return Err(QrError::TruncatedStream);
                }
                let mut value: u8 = 0;
                for i in 0..6 {
                    value = (value << 1) | (bits[bit_idx + i] as u8);
                }
                if value >= 45 {
                    return Err(QrError::InvalidInput(format!(
                        "alphanumeric value {} out of range",
                        value
                    )));
                }
                result.push(ALPHANUMERIC_CHARSET[value as usize] as char);
                bit_idx += 6;
                chars_remaining -= 1;
            }
        }

        Ok((result, bit_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_decode() {
        // "A1" = 10 * 45 + 1 = 451 = 00111000011
        let bits: Vec<bool> = "00111000011".chars().map(|c| c == '1').collect();
        let (decoded, used) = AlphanumericDecoder::decode(&bits, 2).unwrap();
        assert_eq!(decoded, "A1");
        assert_eq!(used, 11);
    }

    #[test]
    fn test_trailing_single() {
        // ":" is the last alphabet entry, value 44 = 101100
        let bits: Vec<bool> = "101100".chars().map(|c| c == '1').collect();
        let (decoded, _) = AlphanumericDecoder::decode(&bits, 1).unwrap();
        assert_eq!(decoded, ":");
    }

    #[test]
    fn test_out_of_range_pair() {
        // 45*45 = 2025 = 11111101001 is not a valid pair value.
        let bits: Vec<bool> = "11111101001".chars().map(|c| c == '1').collect();
        assert!(AlphanumericDecoder::decode(&bits, 2).is_err());
    }

    #[test]
    fn test_truncated() {
        let bits = vec![true; 5];
        assert_eq!(
            AlphanumericDecoder::decode(&bits, 2),
            Err(QrError::TruncatedStream)
        );
    }
}
