//! Core data structures shared by both pipelines
//!
//! - BitMatrix: packed storage for module grids
//! - Version, ECLevel, MaskPattern, Mode: symbol metadata
//! - EncodeOptions / EncodedSymbol: encoder interface types
//! - DecodedQr / DecodeReport: decoder result types

pub mod matrix;
pub mod qr_code;

pub use matrix::BitMatrix;
pub use qr_code::{
    DecodeReport, DecodedQr, ECLevel, EncodeMode, EncodeOptions, EncodedSymbol, MaskPattern, Mode,
    StructuredAppendInfo, Version,
};
