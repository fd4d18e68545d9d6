//! QR symbol decoding
//!
//! This module contains the inverse pipeline, consuming a rectified
//! module matrix:
//! - Format and version information extraction (BCH-protected)
//! - Unmasking and zig-zag bitstream extraction
//! - Reed-Solomon block correction
//! - Data mode decoding (numeric, alphanumeric, byte, kanji, ECI,
//!   FNC1, structured append)

/// Bitstream extraction from QR matrix
pub mod bitstream;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Data mode decoders
pub mod modes;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// QR code unmasking (removes mask patterns)
pub mod unmask;
/// Version information extraction (versions 7-40)
pub mod version;
