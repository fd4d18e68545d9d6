use thiserror::Error;

use crate::models::ECLevel;

/// Errors produced by the encoder and decoder pipelines.
///
/// Every fallible operation in the crate returns one of these; the
/// top-level `encode`/`decode` calls surface the first error verbatim
/// and never return partial output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// Input rejected before any encoding work: a character outside the
    /// selected mode's alphabet, an out-of-range version, mask, ECI
    /// designator or structured-append count.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The input does not fit in the requested (version, EC level).
    #[error("input needs {needed} data bits but version {version} at level {level:?} holds {available}")]
    CapacityExceeded {
        version: u8,
        level: ECLevel,
        needed: usize,
        available: usize,
    },

    /// Both redundant format reads failed BCH correction or disagree.
    #[error("format information unreadable")]
    UnreadableFormat,

    /// Both redundant version reads failed BCH correction or disagree.
    #[error("version information unreadable")]
    UnreadableVersion,

    /// Reed-Solomon correction exceeded the error bound for a block.
    #[error("block {block} has more errors than its ECC can correct")]
    UnrecoverableBlock { block: usize },

    /// The data bitstream ended before a segment's indicated length.
    #[error("bitstream truncated while decoding data segments")]
    TruncatedStream,

    /// An undefined 4-bit mode indicator with non-zero bits remaining.
    #[error("illegal mode indicator {0:#06b}")]
    IllegalMode(u8),

    /// GF(256) division or inversion by zero.
    #[error("GF(256) division by zero")]
    DivisionByZero,

    /// Bookkeeping inconsistency that cannot occur on well-formed input.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}
