//! Version information extraction (versions 7-40)
//!
//! Symbols of version 7 and above carry an 18-bit BCH-protected version
//! word in two 3x6 blocks. Both copies are read and reconciled the same
//! way as the format word, then cross-checked against the version the
//! side length implies.

use crate::bch;
use crate::error::QrError;
use crate::function_mask::version_positions;
use crate::models::{BitMatrix, Version};

/// Reader for the redundant version word.
pub struct VersionInfo;

impl VersionInfo {
    /// Read both version words and require agreement with the version
    /// implied by the matrix size.
    pub fn extract(matrix: &BitMatrix, expected: Version) -> Result<Version, QrError> {
        let size = matrix.width();
        let mut top_right = 0u32;
        let mut bottom_left = 0u32;
        for i in 0..18 {
            let ((trx, try_), (blx, bly)) = version_positions(i, size);
            top_right |= (matrix.get(trx, try_) as u32) << i;
            bottom_left |= (matrix.get(blx, bly) as u32) << i;
        }

        let decoded_tr = bch::nearest_version(top_right);
        let decoded_bl = bch::nearest_version(bottom_left);

        let version = match (decoded_tr, decoded_bl) {
            (Some((v1, d1)), Some((v2, d2))) => {
                if v1 == v2 {
                    v1
                } else if d1 == 0 {
                    v1
                } else if d2 == 0 {
                    v2
                } else {
                    return Err(QrError::UnreadableVersion);
                }
            }
            (Some((v, _)), None) | (None, Some((v, _))) => v,
            (None, None) => return Err(QrError::UnreadableVersion),
        };

        if version != expected {
            return Err(QrError::UnreadableVersion);
        }
        Ok(version)
    }
}
