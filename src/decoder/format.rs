//! Format information extraction
//!
//! The 15-bit format word is stored twice; each copy is independently
//! run through the nearest-codeword search and the two results are
//! reconciled: agreement wins, a clean (distance-zero) read beats a
//! corrected one, anything else is unreadable.

use crate::bch;
use crate::error::QrError;
use crate::function_mask::{format_position_main, format_position_second};
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Decoded format word: EC level and mask pattern.
pub struct FormatInfo {
    /// Error-correction level from the 2-bit wire code.
    pub ec_level: ECLevel,
    /// Mask pattern from the 3-bit field.
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Read and reconcile both format copies.
    pub fn extract(matrix: &BitMatrix) -> Result<Self, QrError> {
        let size = matrix.width();
        let mut main = 0u16;
        let mut second = 0u16;
        for i in 0..15 {
            let (x, y) = format_position_main(i);
            main |= (matrix.get(x, y) as u16) << i;
            let (x, y) = format_position_second(i, size);
            second |= (matrix.get(x, y) as u16) << i;
        }

        let decoded_main = bch::nearest_format(main);
        let decoded_second = bch::nearest_format(second);

        let (level, mask) = match (decoded_main, decoded_second) {
            (Some((l1, m1, d1)), Some((l2, m2, d2))) => {
                if (l1, m1) == (l2, m2) {
                    (l1, m1)
                } else if d1 == 0 {
                    (l1, m1)
                } else if d2 == 0 {
                    (l2, m2)
                } else {
                    return Err(QrError::UnreadableFormat);
                }
            }
            (Some((l, m, _)), None) | (None, Some((l, m, _))) => (l, m),
            (None, None) => return Err(QrError::UnreadableFormat),
        };
        Ok(Self {
            ec_level: level,
            mask_pattern: mask,
        })
    }
}
