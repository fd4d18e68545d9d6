/// Bitstream extraction from QR code matrix
use crate::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Extract raw bitstream from QR code matrix following the zig-zag
/// pattern, skipping function modules.
pub struct BitstreamExtractor;

impl BitstreamExtractor {
    /// Data module bits in placement order; length equals the data
    /// module count for the version (codeword bits plus remainder).
    pub fn extract(matrix: &BitMatrix, func: &FunctionMask) -> Vec<bool> {
        func.zigzag_coordinates()
            .into_iter()
            .map(|(x, y)| matrix.get(x, y))
            .collect()
    }

    /// Pack extracted bits into codewords, most significant bit first;
    /// trailing remainder bits are dropped.
    pub fn to_codewords(bits: &[bool]) -> Vec<u8> {
        bits.chunks_exact(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
            .collect()
    }
}
