//! Data segment decoding
//!
//! The dispatch loop reads a 4-bit mode indicator, hands the payload
//! decoders an explicit bit cursor, and accumulates bytes plus the
//! stream-level state (ECI, FNC1 flags, structured-append header) into
//! a [`ParsedPayload`].

pub mod alphanumeric;
pub mod byte;
pub mod kanji;
pub mod numeric;

use crate::error::QrError;
use crate::models::{Mode, StructuredAppendInfo, Version};

use alphanumeric::AlphanumericDecoder;
use byte::ByteDecoder;
use kanji::KanjiDecoder;
use numeric::NumericDecoder;

/// Default ECI assignment: 26, UTF-8.
pub const DEFAULT_ECI: u32 = 26;

/// Everything the data bitstream yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPayload {
    /// Decoded bytes across all data segments.
    pub data: Vec<u8>,
    /// Segment modes in stream order, first occurrence only.
    pub modes: Vec<Mode>,
    /// Declared character set; [`DEFAULT_ECI`] unless changed.
    pub eci: u32,
    /// FNC1-first segment seen.
    pub fnc1_first: bool,
    /// Application indicator of an FNC1-second segment.
    pub fnc1_second_ai: Option<u8>,
    /// Structured-append header, when present.
    pub structured_append: Option<StructuredAppendInfo>,
}

struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    fn remaining(&self) -> usize {
        self.bits.len() - self.idx
    }

    fn rest(&self) -> &'a [bool] {
        &self.bits[self.idx..]
    }

    fn advance(&mut self, n: usize) {
        self.idx += n;
    }

    fn read_bits(&mut self, n: usize) -> Result<u32, QrError> {
        if self.idx + n > self.bits.len() {
            return Err(QrError::TruncatedStream);
        }
        let mut value = 0u32;
        for _ in 0..n {
            value = (value << 1) | (self.bits[self.idx] as u32);
            self.idx += 1;
        }
        Ok(value)
    }
}

/// Decode the corrected, de-interleaved data bitstream.
pub fn decode_payload(bits: &[bool], version: Version) -> Result<ParsedPayload, QrError> {
    let mut reader = BitReader::new(bits);
    let mut payload = ParsedPayload {
        data: Vec::new(),
        modes: Vec::new(),
        eci: DEFAULT_ECI,
        fnc1_first: false,
        fnc1_second_ai: None,
        structured_append: None,
    };

    while reader.remaining() >= 4 {
        let indicator = reader.read_bits(4)? as u8;
        let mode = match Mode::from_indicator(indicator) {
            Some(Mode::Terminator) => break,
            Some(mode) => mode,
            None => return Err(QrError::IllegalMode(indicator)),
        };
        payload.modes.push(mode);

        match mode {
            Mode::Numeric => {
                let count = reader.read_bits(mode.char_count_bits(version))? as usize;
                let (text, used) = NumericDecoder::decode(reader.rest(), count)?;
                reader.advance(used);
                payload.data.extend_from_slice(text.as_bytes());
            }
            Mode::Alphanumeric => {
                let count = reader.read_bits(mode.char_count_bits(version))? as usize;
                let (text, used) = AlphanumericDecoder::decode(reader.rest(), count)?;
                reader.advance(used);
                payload.data.extend_from_slice(text.as_bytes());
            }
            Mode::Byte => {
                let count = reader.read_bits(mode.char_count_bits(version))? as usize;
                let (bytes, used) = ByteDecoder::decode(reader.rest(), count)?;
                reader.advance(used);
                payload.data.extend_from_slice(&bytes);
            }
            Mode::Kanji => {
                let count = reader.read_bits(mode.char_count_bits(version))? as usize;
                let (bytes, used) = KanjiDecoder::decode(reader.rest(), count)?;
                reader.advance(used);
                payload.data.extend_from_slice(&bytes);
            }
            Mode::Eci => {
                payload.eci = read_eci_designator(&mut reader)?;
            }
            Mode::Fnc1First => {
                payload.fnc1_first = true;
            }
            Mode::Fnc1Second => {
                payload.fnc1_second_ai = Some(reader.read_bits(8)? as u8);
            }
            Mode::StructuredAppend => {
                let index = reader.read_bits(4)? as u8;
                let count = reader.read_bits(4)? as u8 + 1;
                let parity = reader.read_bits(8)? as u8;
                payload.structured_append = Some(StructuredAppendInfo {
                    index,
                    count,
                    parity,
                });
            }
            Mode::Terminator => unreachable!("terminator breaks above"),
        }
    }

    let mut summary = Vec::new();
    for mode in payload.modes.drain(..) {
        if !summary.contains(&mode) {
            summary.push(mode);
        }
    }
    payload.modes = summary;
    Ok(payload)
}

/// ECI designator: 1, 2 or 3 bytes selected by the leading bits
/// (0 / 10 / 110).
fn read_eci_designator(reader: &mut BitReader) -> Result<u32, QrError> {
    let first = reader.read_bits(8)?;
    let value = if first & 0x80 == 0 {
        first & 0x7F
    } else if first & 0xC0 == 0x80 {
        ((first & 0x3F) << 8) | reader.read_bits(8)?
    } else if first & 0xE0 == 0xC0 {
        ((first & 0x1F) << 16) | reader.read_bits(16)?
    } else {
        return Err(QrError::InvalidInput(format!(
            "ECI designator prefix {:#04x} is not 0/10/110",
            first
        )));
    };
    if value > 999_999 {
        return Err(QrError::InvalidInput(format!(
            "ECI designator {} out of range 0-999999",
            value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::bits::BitWriter;
    use crate::encoder::modes::Segment;

    fn v1() -> Version {
        Version::new(1).unwrap()
    }

    fn write_segments(segments: &[Segment]) -> Vec<bool> {
        let mut w = BitWriter::new();
        for seg in segments {
            seg.write(&mut w, v1()).unwrap();
        }
        w.append(0, 4); // terminator
        w.bits().to_vec()
    }

    #[test]
    fn test_single_byte_segment() {
        let bits = write_segments(&[Segment::Byte(b"HI".to_vec())]);
        let payload = decode_payload(&bits, v1()).unwrap();
        assert_eq!(payload.data, b"HI");
        assert_eq!(payload.modes, vec![Mode::Byte]);
        assert_eq!(payload.eci, DEFAULT_ECI);
    }

    #[test]
    fn test_mixed_segments() {
        let bits = write_segments(&[
            Segment::alphanumeric(b"QR".to_vec()).unwrap(),
            Segment::numeric(b"2026".to_vec()).unwrap(),
        ]);
        let payload = decode_payload(&bits, v1()).unwrap();
        assert_eq!(payload.data, b"QR2026");
        assert_eq!(payload.modes, vec![Mode::Alphanumeric, Mode::Numeric]);
    }

    #[test]
    fn test_eci_then_bytes() {
        let bits = write_segments(&[
            Segment::eci(899).unwrap(),
            Segment::Byte(vec![0xC3, 0xA9]),
        ]);
        let payload = decode_payload(&bits, v1()).unwrap();
        assert_eq!(payload.eci, 899);
        assert_eq!(payload.data, vec![0xC3, 0xA9]);
    }

    #[test]
    fn test_eci_three_byte_designator() {
        let bits = write_segments(&[
            Segment::eci(999_999).unwrap(),
            Segment::Byte(b"x".to_vec()),
        ]);
        let payload = decode_payload(&bits, v1()).unwrap();
        assert_eq!(payload.eci, 999_999);
    }

    #[test]
    fn test_fnc1_first_flag() {
        let bits = write_segments(&[Segment::Fnc1First, Segment::numeric(b"0195".to_vec()).unwrap()]);
        let payload = decode_payload(&bits, v1()).unwrap();
        assert!(payload.fnc1_first);
        assert_eq!(payload.data, b"0195");
    }

    #[test]
    fn test_fnc1_second_carries_ai() {
        let bits = write_segments(&[
            Segment::Fnc1Second(37),
            Segment::alphanumeric(b"GS1".to_vec()).unwrap(),
        ]);
        let payload = decode_payload(&bits, v1()).unwrap();
        assert_eq!(payload.fnc1_second_ai, Some(37));
    }

    #[test]
    fn test_structured_append_header() {
        let info = StructuredAppendInfo {
            index: 3,
            count: 7,
            parity: 0x5C,
        };
        let bits = write_segments(&[
            Segment::StructuredAppend(info),
            Segment::Byte(b"part".to_vec()),
        ]);
        let payload = decode_payload(&bits, v1()).unwrap();
        assert_eq!(payload.structured_append, Some(info));
        assert_eq!(payload.data, b"part");
    }

    #[test]
    fn test_illegal_mode() {
        let mut w = BitWriter::new();
        w.append(0b0110, 4);
        w.append(0xFF, 8);
        assert_eq!(
            decode_payload(w.bits(), v1()),
            Err(QrError::IllegalMode(0b0110))
        );
    }

    #[test]
    fn test_truncated_count() {
        let mut w = BitWriter::new();
        w.append(0b0100, 4); // byte mode, then nothing
        assert_eq!(decode_payload(w.bits(), v1()), Err(QrError::TruncatedStream));
    }

    #[test]
    fn test_truncated_payload() {
        let mut w = BitWriter::new();
        w.append(0b0100, 4);
        w.append(4, 8); // promises 4 bytes
        w.append(0xAB, 8); // delivers one
        assert_eq!(decode_payload(w.bits(), v1()), Err(QrError::TruncatedStream));
    }

    #[test]
    fn test_stream_without_terminator_ends_cleanly() {
        let mut w = BitWriter::new();
        Segment::Byte(b"ok".to_vec()).write(&mut w, v1()).unwrap();
        let payload = decode_payload(w.bits(), v1()).unwrap();
        assert_eq!(payload.data, b"ok");
    }
}
