//! Decode orchestration
//!
//! Consumes a rectified module matrix and runs the inverse pipeline:
//! format word, version word (v7+), unmask, zig-zag extraction,
//! de-interleave, Reed-Solomon correction, segment parsing.

use crate::decoder::bitstream::BitstreamExtractor;
use crate::decoder::format::FormatInfo;
use crate::decoder::modes::decode_payload;
use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::decoder::unmask::unmask;
use crate::decoder::version::VersionInfo;
use crate::error::QrError;
use crate::function_mask::FunctionMask;
use crate::models::{BitMatrix, DecodeReport, DecodedQr, ECLevel, Version};
use crate::tables;

/// Decoder entry point; see [`crate::decode`].
pub struct QrDecoder;

impl QrDecoder {
    /// Decode one symbol from its module matrix.
    pub fn decode(matrix: &BitMatrix) -> Result<DecodedQr, QrError> {
        if matrix.width() != matrix.height() {
            return Err(QrError::InvalidInput(format!(
                "matrix is {}x{}, expected square",
                matrix.width(),
                matrix.height()
            )));
        }
        let version = Version::from_size(matrix.width())?;

        let format = FormatInfo::extract(matrix)?;
        if version.number() >= 7 {
            VersionInfo::extract(matrix, version)?;
        }

        let func = FunctionMask::new(version);
        let mut unmasked = matrix.clone();
        unmask(&mut unmasked, format.mask_pattern, &func);

        let bits = BitstreamExtractor::extract(&unmasked, &func);
        let codewords = BitstreamExtractor::to_codewords(&bits);
        let data_codewords =
            Self::deinterleave_and_correct(&codewords, version, format.ec_level)?;

        let mut data_bits = Vec::with_capacity(data_codewords.len() * 8);
        for &codeword in &data_codewords {
            for i in (0..8).rev() {
                data_bits.push((codeword >> i) & 1 != 0);
            }
        }
        let payload = decode_payload(&data_bits, version)?;

        let content = String::from_utf8_lossy(&payload.data).into_owned();
        Ok(DecodedQr {
            data: payload.data,
            content,
            report: DecodeReport {
                version,
                ec_level: format.ec_level,
                mask: format.mask_pattern,
                mode_summary: payload.modes,
                eci: payload.eci,
                structured_append: payload.structured_append,
                fnc1_first: payload.fnc1_first,
                fnc1_second_ai: payload.fnc1_second_ai,
            },
        })
    }

    /// Undo the block interleaving and correct each block in place.
    fn deinterleave_and_correct(
        codewords: &[u8],
        version: Version,
        ec_level: ECLevel,
    ) -> Result<Vec<u8>, QrError> {
        let partition = tables::block_partition(version, ec_level);
        if codewords.len() != tables::total_codewords(version) {
            return Err(QrError::InternalInvariant(
                "extracted codeword count does not match the version",
            ));
        }

        let blocks_total = partition.total_blocks();
        let longest = partition.data_per_block_g2.max(partition.data_per_block_g1);
        let mut blocks: Vec<Vec<u8>> = (0..blocks_total)
            .map(|b| Vec::with_capacity(partition.data_len(b) + partition.ecc_per_block))
            .collect();

        let mut idx = 0;
        for col in 0..longest {
            for (b, block) in blocks.iter_mut().enumerate() {
                if col < partition.data_len(b) {
                    block.push(codewords[idx]);
                    idx += 1;
                }
            }
        }
        for _ in 0..partition.ecc_per_block {
            for block in blocks.iter_mut() {
                block.push(codewords[idx]);
                idx += 1;
            }
        }

        let rs = ReedSolomonDecoder::new(partition.ecc_per_block);
        let mut data = Vec::with_capacity(partition.total_data_codewords());
        for (b, block) in blocks.iter_mut().enumerate() {
            rs.decode(block)
                .map_err(|_| QrError::UnrecoverableBlock { block: b })?;
            data.extend_from_slice(&block[..partition.data_len(b)]);
        }
        Ok(data)
    }
}
