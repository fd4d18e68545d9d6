//! Reed-Solomon block encoding and codeword interleaving
//!
//! Each block's ECC is the remainder of d(x)·x^t divided by the degree-t
//! generator g(x) = (x - a^0)(x - a^1)...(x - a^(t-1)). Codewords are
//! then interleaved column-wise across blocks, data first, ECC after.

use crate::error::QrError;
use crate::gf256::{Gf256, Polynomial};
use crate::tables::BlockPartition;

/// Reed-Solomon encoder for a fixed ECC length.
pub struct ReedSolomonEncoder {
    ecc_per_block: usize,
    generator: Polynomial,
}

impl ReedSolomonEncoder {
    /// Build the degree-t generator polynomial.
    pub fn new(ecc_per_block: usize) -> Self {
        let mut generator = Polynomial::one();
        for i in 0..ecc_per_block {
            // Multiply by (x - a^i); subtraction is addition in GF(256).
            generator = generator.mul(&Polynomial::new(vec![Gf256::exp(i), 1]));
        }
        Self {
            ecc_per_block,
            generator,
        }
    }

    /// ECC codewords for one data block, in transmission order.
    pub fn ecc_block(&self, data: &[u8]) -> Result<Vec<u8>, QrError> {
        // data[0] is the highest-degree coefficient; the polynomial type
        // stores lowest degree first.
        let mut coeffs = vec![0u8; self.ecc_per_block];
        coeffs.extend(data.iter().rev());
        let dividend = Polynomial::new(coeffs);
        let mut remainder = dividend.div_remainder(&self.generator, self.ecc_per_block)?;
        remainder.reverse();
        Ok(remainder)
    }
}

/// Split `data` into the partition's blocks, compute each block's ECC
/// and interleave: data codewords column-major across blocks, then ECC
/// codewords column-major.
pub fn interleave_blocks(data: &[u8], partition: &BlockPartition) -> Result<Vec<u8>, QrError> {
    if data.len() != partition.total_data_codewords() {
        return Err(QrError::InternalInvariant(
            "padded data length does not match the block partition",
        ));
    }

    let encoder = ReedSolomonEncoder::new(partition.ecc_per_block);
    let blocks_total = partition.total_blocks();
    let mut blocks: Vec<&[u8]> = Vec::with_capacity(blocks_total);
    let mut offset = 0;
    for b in 0..blocks_total {
        let len = partition.data_len(b);
        blocks.push(&data[offset..offset + len]);
        offset += len;
    }

    let ecc: Vec<Vec<u8>> = blocks
        .iter()
        .map(|block| encoder.ecc_block(block))
        .collect::<Result<_, _>>()?;

    let mut out = Vec::with_capacity(data.len() + blocks_total * partition.ecc_per_block);
    let longest = partition.data_per_block_g2.max(partition.data_per_block_g1);
    for col in 0..longest {
        for block in &blocks {
            if let Some(&codeword) = block.get(col) {
                out.push(codeword);
            }
        }
    }
    for col in 0..partition.ecc_per_block {
        for block_ecc in &ecc {
            out.push(block_ecc[col]);
        }
    }
    Ok(out)
}
