//! QR symbol encoding
//!
//! Pipeline: segment the input (modes + auto selection), size the
//! version, pad the bitstream, Reed-Solomon encode and interleave the
//! blocks, place modules, pick a mask and stamp the format/version
//! words. The structured-append coordinator wraps the same pipeline
//! once per symbol.

/// MSB-first bit accumulator
pub mod bits;
/// Module placement, masking and stamping
pub mod matrix_builder;
/// Segment payload encoders
pub mod modes;
/// Reed-Solomon block encoding and interleaving
pub mod reed_solomon;
/// Mode selection and version auto-sizing
pub mod segmenter;

use crate::error::QrError;
use crate::function_mask::FunctionMask;
use crate::models::{
    ECLevel, EncodeMode, EncodeOptions, EncodedSymbol, MaskPattern, StructuredAppendInfo, Version,
};
use crate::tables;

use bits::BitWriter;
use matrix_builder::MatrixBuilder;
use modes::Segment;
use segmenter::{best_single_segment, choose_version, segment_auto};

const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Encoder entry point; see [`crate::encode`].
pub struct QrEncoder;

impl QrEncoder {
    /// Encode `input` into one or more symbols per the options.
    pub fn encode(input: &str, opts: &EncodeOptions) -> Result<Vec<EncodedSymbol>, QrError> {
        let forced_mask = validate_mask(opts.mask)?;
        if opts.version != 0 {
            Version::new(opts.version)?;
        }

        let bytes = input.as_bytes();
        let symbol_count = opts.structured_append_count;
        if symbol_count == 0 || symbol_count > 16 {
            return Err(QrError::InvalidInput(format!(
                "structured append count {} out of range 1-16",
                symbol_count
            )));
        }

        let split = opts.mode == EncodeMode::StructuredAppend || symbol_count > 1;
        if !split {
            let symbol = Self::encode_symbol(bytes, opts, None, forced_mask)?;
            return Ok(vec![symbol]);
        }

        // Structured append: split into near-equal chunks; every header
        // carries the parity of the full input.
        let count = symbol_count as usize;
        let parity = bytes.iter().fold(0u8, |acc, &b| acc ^ b);
        let chunk_len = bytes.len().div_ceil(count).max(1);
        let mut symbols = Vec::with_capacity(count);
        for index in 0..count {
            let start = (index * chunk_len).min(bytes.len());
            let end = ((index + 1) * chunk_len).min(bytes.len());
            let header = StructuredAppendInfo {
                index: index as u8,
                count: symbol_count,
                parity,
            };
            symbols.push(Self::encode_symbol(
                &bytes[start..end],
                opts,
                Some(header),
                forced_mask,
            )?);
        }
        Ok(symbols)
    }

    fn encode_symbol(
        bytes: &[u8],
        opts: &EncodeOptions,
        sa_header: Option<StructuredAppendInfo>,
        forced_mask: Option<MaskPattern>,
    ) -> Result<EncodedSymbol, QrError> {
        let (segments, version) = choose_version(opts, |bracket| {
            let mut segments = Vec::new();
            if let Some(header) = sa_header {
                segments.push(Segment::StructuredAppend(header));
            }
            segments.extend(Self::body_segments(bytes, opts, bracket)?);
            Ok(segments)
        })?;

        let codewords = Self::build_codewords(&segments, version, opts.ec_level)?;
        let partition = tables::block_partition(version, opts.ec_level);
        let interleaved = reed_solomon::interleave_blocks(&codewords, &partition)?;

        let mut bits = Vec::with_capacity(interleaved.len() * 8);
        for codeword in interleaved {
            for i in (0..8).rev() {
                bits.push((codeword >> i) & 1 != 0);
            }
        }

        let mut builder = MatrixBuilder::new(version);
        builder.place_data(&bits)?;
        let (matrix, mask) = builder.finish(opts.ec_level, forced_mask);

        Ok(EncodedSymbol {
            matrix,
            version,
            ec_level: opts.ec_level,
            mask,
        })
    }

    /// Body segments for one symbol at the bracket's count widths.
    fn body_segments(
        bytes: &[u8],
        opts: &EncodeOptions,
        bracket: Version,
    ) -> Result<Vec<Segment>, QrError> {
        Ok(match opts.mode {
            EncodeMode::Auto | EncodeMode::StructuredAppend => segment_auto(bytes, bracket),
            EncodeMode::Numeric => vec![Segment::numeric(bytes.to_vec())?],
            EncodeMode::Alphanumeric => vec![Segment::alphanumeric(bytes.to_vec())?],
            EncodeMode::Byte => vec![Segment::Byte(bytes.to_vec())],
            EncodeMode::Kanji => vec![Segment::kanji(bytes.to_vec())?],
            EncodeMode::Eci => vec![
                Segment::eci(opts.eci_designator)?,
                best_single_segment(bytes),
            ],
            EncodeMode::Fnc1First => vec![Segment::Fnc1First, best_single_segment(bytes)],
            EncodeMode::Fnc1Second => vec![
                Segment::Fnc1Second(opts.fnc1_second_ai),
                best_single_segment(bytes),
            ],
        })
    }

    /// Serialize segments, terminate, pad to full data capacity.
    fn build_codewords(
        segments: &[Segment],
        version: Version,
        level: ECLevel,
    ) -> Result<Vec<u8>, QrError> {
        let capacity = tables::data_codewords(version, level) * 8;
        let mut writer = BitWriter::new();
        for segment in segments {
            segment.write(&mut writer, version)?;
        }
        if writer.len() > capacity {
            return Err(QrError::InternalInvariant(
                "serialized stream exceeds the capacity the planner accepted",
            ));
        }

        let terminator = (capacity - writer.len()).min(4);
        writer.append(0, terminator);
        let unaligned = writer.len() % 8;
        if unaligned != 0 {
            writer.append(0, 8 - unaligned);
        }

        let mut codewords = writer.into_codewords();
        let data_capacity = capacity / 8;
        let mut alternate = 0;
        while codewords.len() < data_capacity {
            codewords.push(PAD_CODEWORDS[alternate]);
            alternate ^= 1;
        }
        Ok(codewords)
    }
}

fn validate_mask(mask: i8) -> Result<Option<MaskPattern>, QrError> {
    match mask {
        -1 => Ok(None),
        0..=7 => Ok(MaskPattern::from_bits(mask as u8)),
        _ => Err(QrError::InvalidInput(format!(
            "mask {} out of range -1..=7",
            mask
        ))),
    }
}

/// Remainder bits after the codeword stream for a version; always zero
/// on the wire.
pub fn remainder_bits(version: Version) -> usize {
    FunctionMask::new(version).data_modules_count() - tables::total_codewords(version) * 8
}
