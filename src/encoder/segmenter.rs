//! Mode selection and version auto-sizing
//!
//! `segment_auto` finds the cheapest split of the input into numeric,
//! alphanumeric and byte segments by dynamic programming over split
//! points: s[j] is the minimum bit length for the first j bytes, and
//! each step extends a segment of one mode backwards from j. Kanji is
//! handled before the DP: it is only chosen when the entire input is
//! Shift-JIS-eligible.

use crate::encoder::modes::{alphanumeric_value, is_kanji_eligible, Segment};
use crate::error::QrError;
use crate::models::{EncodeOptions, Mode, Version};
use crate::tables;

const INFINITY: usize = usize::MAX / 2;

fn numeric_cost(len: usize, version: Version) -> usize {
    4 + Mode::Numeric.char_count_bits(version) + 10 * (len / 3) + [0, 4, 7][len % 3]
}

fn alphanumeric_cost(len: usize, version: Version) -> usize {
    4 + Mode::Alphanumeric.char_count_bits(version) + 11 * (len / 2) + 6 * (len % 2)
}

fn byte_cost(len: usize, version: Version) -> usize {
    4 + Mode::Byte.char_count_bits(version) + 8 * len
}

/// Minimum-bit segmentation of `input` for the version's count-width
/// bracket. Returns segments in input order.
pub fn segment_auto(input: &[u8], version: Version) -> Vec<Segment> {
    if input.is_empty() {
        return Vec::new();
    }
    if is_kanji_eligible(input) {
        return vec![Segment::Kanji(input.to_vec())];
    }

    let n = input.len();
    let mut best = vec![INFINITY; n + 1];
    let mut parent: Vec<(usize, Mode)> = vec![(0, Mode::Byte); n + 1];
    best[0] = 0;

    for j in 0..n {
        // Walk split points backwards; alphabet membership of
        // input[k..=j] only narrows as k decreases.
        let mut all_numeric = true;
        let mut all_alpha = true;
        for k in (0..=j).rev() {
            all_numeric &= input[k].is_ascii_digit();
            all_alpha &= alphanumeric_value(input[k]).is_some();
            let len = j + 1 - k;

            let mut relax = |mode: Mode, cost: usize| {
                if best[k] + cost < best[j + 1] {
                    best[j + 1] = best[k] + cost;
                    parent[j + 1] = (k, mode);
                }
            };
            if all_numeric {
                relax(Mode::Numeric, numeric_cost(len, version));
            }
            if all_alpha {
                relax(Mode::Alphanumeric, alphanumeric_cost(len, version));
            }
            relax(Mode::Byte, byte_cost(len, version));
        }
    }

    let mut segments = Vec::new();
    let mut j = n;
    while j > 0 {
        let (k, mode) = parent[j];
        let bytes = input[k..j].to_vec();
        segments.push(match mode {
            Mode::Numeric => Segment::Numeric(bytes),
            Mode::Alphanumeric => Segment::Alphanumeric(bytes),
            _ => Segment::Byte(bytes),
        });
        j = k;
    }
    segments.reverse();
    segments
}

/// Cheapest single whole-input segment, for the modes that carry exactly
/// one data segment after their header (ECI, FNC1).
pub fn best_single_segment(input: &[u8]) -> Segment {
    if !input.is_empty() && input.iter().all(|b| b.is_ascii_digit()) {
        Segment::Numeric(input.to_vec())
    } else if !input.is_empty() && input.iter().all(|&b| alphanumeric_value(b).is_some()) {
        Segment::Alphanumeric(input.to_vec())
    } else if is_kanji_eligible(input) {
        Segment::Kanji(input.to_vec())
    } else {
        Segment::Byte(input.to_vec())
    }
}

fn total_bits(segments: &[Segment], version: Version) -> usize {
    segments.iter().map(|s| s.bit_len(version)).sum()
}

/// Pick the smallest version whose data capacity holds the segments,
/// re-running `make_segments` per count-width bracket. A fixed version
/// in the options pins the bracket and the choice.
pub fn choose_version(
    opts: &EncodeOptions,
    mut make_segments: impl FnMut(Version) -> Result<Vec<Segment>, QrError>,
) -> Result<(Vec<Segment>, Version), QrError> {
    let level = opts.ec_level;

    if opts.version != 0 {
        let version = Version::new(opts.version)?;
        let segments = make_segments(version)?;
        let needed = total_bits(&segments, version);
        let available = tables::data_codewords(version, level) * 8;
        if needed <= available {
            return Ok((segments, version));
        }
        return Err(QrError::CapacityExceeded {
            version: version.number(),
            level,
            needed,
            available,
        });
    }

    let brackets: [(u8, u8); 3] = [(1, 9), (10, 26), (27, 40)];
    let mut last = (0usize, 0usize);
    for (lo, hi) in brackets {
        let bracket_rep = Version::new(lo)?;
        let segments = make_segments(bracket_rep)?;
        let needed = total_bits(&segments, bracket_rep);
        for number in lo..=hi {
            let version = Version::new(number)?;
            let available = tables::data_codewords(version, level) * 8;
            if needed <= available {
                return Ok((segments, version));
            }
            last = (needed, available);
        }
    }
    Err(QrError::CapacityExceeded {
        version: 40,
        level,
        needed: last.0,
        available: last.1,
    })
}
