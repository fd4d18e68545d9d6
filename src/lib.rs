//! qr-codec - bit-exact QR Code (ISO/IEC 18004) encoder and decoder
//!
//! A pure Rust implementation of the QR Model 2 symbology core:
//! versions 1-40, all four error-correction levels, all eight masks,
//! every data mode (numeric, alphanumeric, byte, kanji, ECI, FNC1,
//! structured append) and the Reed-Solomon code that protects the
//! payload. The encoder turns a string into module matrices; the
//! decoder reverses the process from a rectified module matrix.
//!
//! Image handling (capture, thresholding, perspective sampling) is a
//! separate concern: the decoder expects a clean 0/1 matrix with the
//! finders at the canonical corners and no quiet zone.
//!
//! ```
//! use qr_codec::{decode, encode, EncodeOptions};
//!
//! let symbols = encode("HELLO WORLD", &EncodeOptions::default()).unwrap();
//! let decoded = decode(&symbols[0].matrix).unwrap();
//! assert_eq!(decoded.content, "HELLO WORLD");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// BCH codec for the format and version words
pub mod bch;
/// QR symbol decoding pipeline
pub mod decoder;
/// QR symbol encoding pipeline
pub mod encoder;
/// Error type shared by both pipelines
pub mod error;
/// Reserved-module map and shared bit placements
pub mod function_mask;
/// GF(256) arithmetic and polynomials
pub mod gf256;
/// Core data structures (BitMatrix, Version, options, reports)
pub mod models;
/// Version and error-correction parameter tables
pub mod tables;

pub use error::QrError;
pub use models::{
    BitMatrix, DecodeReport, DecodedQr, ECLevel, EncodeMode, EncodeOptions, EncodedSymbol,
    MaskPattern, Mode, StructuredAppendInfo, Version,
};

use decoder::qr_decoder::QrDecoder;
use encoder::QrEncoder;

/// Encode `input` into one or more QR symbols.
///
/// Returns one matrix per symbol, in positional order; more than one
/// only when structured append splits the input. No quiet zone is
/// included.
pub fn encode(input: &str, options: &EncodeOptions) -> Result<Vec<EncodedSymbol>, QrError> {
    QrEncoder::encode(input, options)
}

/// Decode a single QR symbol from its rectified module matrix.
///
/// The matrix must be square with side 21..=177 and `(side - 17) % 4 == 0`;
/// `true` is a dark module.
pub fn decode(matrix: &BitMatrix) -> Result<DecodedQr, QrError> {
    QrDecoder::decode(matrix)
}
