//! Version and error-correction parameter tables
//!
//! These arrays are the source of truth for capacity and block layout;
//! they carry the QR Code specification (Model 2) values exactly.

use crate::models::{ECLevel, Mode, Version};

/// Total codewords (data + ECC) per version, index 1-40.
const TOTAL_CODEWORDS: [u16; 41] = [
    0, 26, 44, 70, 100, 134, 172, 196, 242, 292, 346, 404, 466, 532, 581, 655, 733, 815, 901, 991,
    1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, 2323, 2465, 2611, 2761, 2876,
    3034, 3196, 3362, 3532, 3706,
];

/// Alignment pattern center coordinates per version, zeros trailing.
/// Version 1 has none; the count grows by one every seven versions.
const ALIGNMENT_POSITIONS: [[u8; 7]; 41] = [
    [0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0],
    [6, 18, 0, 0, 0, 0, 0],
    [6, 22, 0, 0, 0, 0, 0],
    [6, 26, 0, 0, 0, 0, 0],
    [6, 30, 0, 0, 0, 0, 0],
    [6, 34, 0, 0, 0, 0, 0],
    [6, 22, 38, 0, 0, 0, 0],
    [6, 24, 42, 0, 0, 0, 0],
    [6, 26, 46, 0, 0, 0, 0],
    [6, 28, 50, 0, 0, 0, 0],
    [6, 30, 54, 0, 0, 0, 0],
    [6, 32, 58, 0, 0, 0, 0],
    [6, 34, 62, 0, 0, 0, 0],
    [6, 26, 46, 66, 0, 0, 0],
    [6, 26, 48, 70, 0, 0, 0],
    [6, 26, 50, 74, 0, 0, 0],
    [6, 30, 54, 78, 0, 0, 0],
    [6, 30, 56, 82, 0, 0, 0],
    [6, 30, 58, 86, 0, 0, 0],
    [6, 34, 62, 90, 0, 0, 0],
    [6, 28, 50, 72, 94, 0, 0],
    [6, 26, 50, 74, 98, 0, 0],
    [6, 30, 54, 78, 102, 0, 0],
    [6, 28, 54, 80, 106, 0, 0],
    [6, 32, 58, 84, 110, 0, 0],
    [6, 30, 58, 86, 114, 0, 0],
    [6, 34, 62, 90, 118, 0, 0],
    [6, 26, 50, 74, 98, 122, 0],
    [6, 30, 54, 78, 102, 126, 0],
    [6, 26, 52, 78, 104, 130, 0],
    [6, 30, 56, 82, 108, 134, 0],
    [6, 34, 60, 86, 112, 138, 0],
    [6, 30, 58, 86, 114, 142, 0],
    [6, 34, 62, 90, 118, 146, 0],
    [6, 30, 54, 78, 102, 126, 150],
    [6, 24, 50, 76, 102, 128, 154],
    [6, 28, 54, 80, 106, 132, 158],
    [6, 32, 58, 84, 110, 136, 162],
    [6, 26, 54, 82, 110, 138, 166],
    [6, 30, 58, 86, 114, 142, 170],
];

// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Block layout for one (version, EC level): blocks in group 2 carry one
/// more data codeword than blocks in group 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPartition {
    /// ECC codewords appended to every block.
    pub ecc_per_block: usize,
    /// Number of group-1 blocks.
    pub blocks_g1: usize,
    /// Data codewords per group-1 block.
    pub data_per_block_g1: usize,
    /// Number of group-2 blocks (possibly zero).
    pub blocks_g2: usize,
    /// Data codewords per group-2 block.
    pub data_per_block_g2: usize,
}

impl BlockPartition {
    /// Blocks across both groups.
    pub fn total_blocks(&self) -> usize {
        self.blocks_g1 + self.blocks_g2
    }

    /// Data codewords across both groups.
    pub fn total_data_codewords(&self) -> usize {
        self.blocks_g1 * self.data_per_block_g1 + self.blocks_g2 * self.data_per_block_g2
    }

    /// Data codeword length of the b-th block (group 1 blocks first).
    pub fn data_len(&self, block: usize) -> usize {
        if block < self.blocks_g1 {
            self.data_per_block_g1
        } else {
            self.data_per_block_g2
        }
    }
}

/// Total codewords (data + ECC) for a version.
pub fn total_codewords(version: Version) -> usize {
    TOTAL_CODEWORDS[version.number() as usize] as usize
}

/// Alignment pattern center coordinates, without the trailing zeros.
pub fn alignment_positions(version: Version) -> Vec<usize> {
    ALIGNMENT_POSITIONS[version.number() as usize]
        .iter()
        .filter(|&&p| p != 0)
        .map(|&p| p as usize)
        .collect()
}

/// Block layout for a (version, EC level) pair.
pub fn block_partition(version: Version, level: ECLevel) -> BlockPartition {
    let v = version.number() as usize;
    let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[level.index()][v] as usize;
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[level.index()][v] as usize;
    let total = TOTAL_CODEWORDS[v] as usize;
    let data_total = total - blocks * ecc_per_block;

    let data_per_block_g1 = data_total / blocks;
    let blocks_g2 = data_total % blocks;
    BlockPartition {
        ecc_per_block,
        blocks_g1: blocks - blocks_g2,
        data_per_block_g1,
        blocks_g2,
        data_per_block_g2: data_per_block_g1 + 1,
    }
}

/// Data codewords available at a (version, EC level).
pub fn data_codewords(version: Version, level: ECLevel) -> usize {
    block_partition(version, level).total_data_codewords()
}

/// Character capacity for a single full-symbol segment of `mode`,
/// matching ISO/IEC 18004 Table 7. Used for encoder pre-checks; the
/// segmenter does its own exact bit accounting.
pub fn char_capacity(version: Version, level: ECLevel, mode: Mode) -> usize {
    let bits = data_codewords(version, level) * 8;
    let header = 4 + mode.char_count_bits(version);
    if bits <= header {
        return 0;
    }
    let usable = bits - header;
    match mode {
        Mode::Numeric => {
            let mut chars = (usable / 10) * 3;
            match usable % 10 {
                r if r >= 7 => chars += 2,
                r if r >= 4 => chars += 1,
                _ => {}
            }
            chars
        }
        Mode::Alphanumeric => (usable / 11) * 2 + usize::from(usable % 11 >= 6),
        Mode::Byte => usable / 8,
        Mode::Kanji => usable / 13,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_pairs() -> impl Iterator<Item = (Version, ECLevel)> {
        (1..=40u8).flat_map(|v| {
            [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H]
                .into_iter()
                .map(move |l| (Version::new(v).unwrap(), l))
        })
    }

    #[test]
    fn test_partition_accounts_for_every_codeword() {
        for (version, level) in all_pairs() {
            let p = block_partition(version, level);
            let total = p.total_data_codewords() + p.total_blocks() * p.ecc_per_block;
            assert_eq!(
                total,
                total_codewords(version),
                "v{} {:?}",
                version.number(),
                level
            );
            if p.blocks_g2 > 0 {
                assert_eq!(p.data_per_block_g2, p.data_per_block_g1 + 1);
            }
        }
    }

    #[test]
    fn test_known_partitions() {
        // Spot values from the standard's block table.
        let p = block_partition(Version::new(1).unwrap(), ECLevel::L);
        assert_eq!((p.ecc_per_block, p.blocks_g1, p.data_per_block_g1), (7, 1, 19));

        let p = block_partition(Version::new(5).unwrap(), ECLevel::Q);
        assert_eq!(p.ecc_per_block, 18);
        assert_eq!((p.blocks_g1, p.data_per_block_g1), (2, 15));
        assert_eq!((p.blocks_g2, p.data_per_block_g2), (2, 16));

        let p = block_partition(Version::new(40).unwrap(), ECLevel::H);
        assert_eq!(p.total_blocks(), 81);
        assert_eq!(p.ecc_per_block, 30);
    }

    #[test]
    fn test_alignment_positions() {
        let v = |n| Version::new(n).unwrap();
        assert!(alignment_positions(v(1)).is_empty());
        assert_eq!(alignment_positions(v(2)), vec![6, 18]);
        assert_eq!(alignment_positions(v(7)), vec![6, 22, 38]);
        assert_eq!(alignment_positions(v(32)), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(
            alignment_positions(v(40)),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_char_capacities_match_standard() {
        // Spot values from ISO/IEC 18004 Table 7.
        let v = |n| Version::new(n).unwrap();
        assert_eq!(char_capacity(v(1), ECLevel::L, Mode::Numeric), 41);
        assert_eq!(char_capacity(v(1), ECLevel::L, Mode::Alphanumeric), 25);
        assert_eq!(char_capacity(v(1), ECLevel::L, Mode::Byte), 17);
        assert_eq!(char_capacity(v(1), ECLevel::L, Mode::Kanji), 10);
        assert_eq!(char_capacity(v(1), ECLevel::H, Mode::Numeric), 17);
        assert_eq!(char_capacity(v(1), ECLevel::H, Mode::Alphanumeric), 10);
        assert_eq!(char_capacity(v(2), ECLevel::L, Mode::Byte), 32);
        assert_eq!(char_capacity(v(40), ECLevel::L, Mode::Numeric), 7089);
        assert_eq!(char_capacity(v(40), ECLevel::H, Mode::Byte), 1273);
    }
}
