//! Module placement, masking and format/version stamping
//!
//! The builder keeps two layers: the module matrix itself and the
//! reserved map from [`FunctionMask`]. Function patterns and data are
//! placed unmasked; mask candidates are then applied to the data layer
//! only, each candidate gets its masked format word stamped, and the
//! penalty rules pick the winner.

use crate::bch;
use crate::error::QrError;
use crate::function_mask::{
    alignment_centers, format_position_main, format_position_second, version_positions,
    FunctionMask,
};
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Two-layer symbol builder: function patterns plus unmasked data.
pub struct MatrixBuilder {
    version: Version,
    func: FunctionMask,
    matrix: BitMatrix,
}

impl MatrixBuilder {
    /// Stamp every function pattern for `version`; data modules stay
    /// light until [`place_data`](Self::place_data).
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut matrix = BitMatrix::square(size);

        Self::stamp_finder(&mut matrix, 0, 0);
        Self::stamp_finder(&mut matrix, size - 7, 0);
        Self::stamp_finder(&mut matrix, 0, size - 7);

        // Timing patterns between the finders, dark on even coordinates
        for i in 8..size - 8 {
            matrix.set(i, 6, i % 2 == 0);
            matrix.set(6, i, i % 2 == 0);
        }

        // Dark module
        matrix.set(8, size - 8, true);

        for (cx, cy) in alignment_centers(version) {
            Self::stamp_alignment(&mut matrix, cx, cy);
        }

        Self {
            version,
            func: FunctionMask::new(version),
            matrix,
        }
    }

    fn stamp_finder(matrix: &mut BitMatrix, ox: usize, oy: usize) {
        for dy in 0..7 {
            for dx in 0..7 {
                let ring = dx == 0 || dx == 6 || dy == 0 || dy == 6;
                let core = (2..=4).contains(&dx) && (2..=4).contains(&dy);
                matrix.set(ox + dx, oy + dy, ring || core);
            }
        }
    }

    fn stamp_alignment(matrix: &mut BitMatrix, cx: usize, cy: usize) {
        for dy in 0..5i32 {
            for dx in 0..5i32 {
                let dark = dx == 0 || dx == 4 || dy == 0 || dy == 4 || (dx == 2 && dy == 2);
                let x = (cx as i32 - 2 + dx) as usize;
                let y = (cy as i32 - 2 + dy) as usize;
                matrix.set(x, y, dark);
            }
        }
    }

    /// Write the interleaved codeword bits in zig-zag order. Trailing
    /// remainder modules stay light.
    pub fn place_data(&mut self, bits: &[bool]) -> Result<(), QrError> {
        let coords = self.func.zigzag_coordinates();
        if bits.len() > coords.len() {
            return Err(QrError::InternalInvariant(
                "codeword stream longer than the symbol's data area",
            ));
        }
        for (&bit, &(x, y)) in bits.iter().zip(&coords) {
            self.matrix.set(x, y, bit);
        }
        Ok(())
    }

    /// Apply the best (or forced) mask, stamp format and version words,
    /// and return the finished matrix.
    pub fn finish(
        self,
        level: ECLevel,
        forced_mask: Option<MaskPattern>,
    ) -> (BitMatrix, MaskPattern) {
        if let Some(mask) = forced_mask {
            return (self.stamped(level, mask), mask);
        }

        let mut best_mask = MaskPattern::Pattern0;
        let mut best_matrix = self.stamped(level, best_mask);
        let mut best_score = penalty(&best_matrix);
        for &mask in &MaskPattern::ALL[1..] {
            let candidate = self.stamped(level, mask);
            let score = penalty(&candidate);
            if score < best_score {
                best_matrix = candidate;
                best_mask = mask;
                best_score = score;
            }
        }
        (best_matrix, best_mask)
    }

    fn stamped(&self, level: ECLevel, mask: MaskPattern) -> BitMatrix {
        let size = self.matrix.width();
        let mut matrix = self.matrix.clone();

        for y in 0..size {
            for x in 0..size {
                if !self.func.is_function(x, y) && mask.is_masked(y, x) {
                    matrix.toggle(x, y);
                }
            }
        }

        let format = bch::encode_format(level, mask);
        for i in 0..15 {
            let bit = (format >> i) & 1 != 0;
            let (x, y) = format_position_main(i);
            matrix.set(x, y, bit);
            let (x, y) = format_position_second(i, size);
            matrix.set(x, y, bit);
        }

        if self.version.number() >= 7 {
            let word = bch::encode_version(self.version);
            for i in 0..18 {
                let bit = (word >> i) & 1 != 0;
                let ((trx, try_), (blx, bly)) = version_positions(i, size);
                matrix.set(trx, try_, bit);
                matrix.set(blx, bly, bit);
            }
        }

        matrix
    }
}

/// Total penalty score: same-colour runs, solid 2x2 blocks, finder-like
/// patterns and dark-module balance.
pub fn penalty(matrix: &BitMatrix) -> u32 {
    penalty_runs(matrix) + penalty_blocks(matrix) + penalty_finder_like(matrix)
        + penalty_balance(matrix)
}

fn penalty_runs(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut score = 0;
    let mut tally = |run: usize| {
        if run >= 5 {
            score += 3 + (run as u32 - 5);
        }
    };

    for y in 0..size {
        let mut run = 1;
        for x in 1..size {
            if matrix.get(x, y) == matrix.get(x - 1, y) {
                run += 1;
            } else {
                tally(run);
                run = 1;
            }
        }
        tally(run);
    }
    for x in 0..size {
        let mut run = 1;
        for y in 1..size {
            if matrix.get(x, y) == matrix.get(x, y - 1) {
                run += 1;
            } else {
                tally(run);
                run = 1;
            }
        }
        tally(run);
    }
    score
}

fn penalty_blocks(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut score = 0;
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let c = matrix.get(x, y);
            if matrix.get(x + 1, y) == c && matrix.get(x, y + 1) == c && matrix.get(x + 1, y + 1) == c
            {
                score += 3;
            }
        }
    }
    score
}

fn penalty_finder_like(matrix: &BitMatrix) -> u32 {
    // 1011101 with four light modules on one side, scanned in both
    // directions along rows and columns.
    const CORE: [bool; 7] = [true, false, true, true, true, false, true];
    let size = matrix.width();
    let mut score = 0;

    let matches = |get: &dyn Fn(usize) -> bool, start: usize| {
        let core_at = |offset: usize| (0..7).all(|i| get(start + offset + i) == CORE[i]);
        let light_at = |offset: usize| (0..4).all(|i| !get(start + offset + i));
        (core_at(0) && light_at(7)) || (light_at(0) && core_at(4))
    };

    for y in 0..size {
        for start in 0..=size.saturating_sub(11) {
            let row = |i: usize| matrix.get(i, y);
            if matches(&row, start) {
                score += 40;
            }
        }
    }
    for x in 0..size {
        for start in 0..=size.saturating_sub(11) {
            let col = |i: usize| matrix.get(x, i);
            if matches(&col, start) {
                score += 40;
            }
        }
    }
    score
}

fn penalty_balance(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let total = (size * size) as i32;
    let dark = matrix.count_dark() as i32;
    // Percentage rounded to nearest, then distance from 50 to the
    // bracketing multiples of five.
    let percent = (dark * 200 + total) / (2 * total);
    let lower = (percent / 5) * 5;
    let upper = lower + 5;
    10 * (lower - 50).abs().min((upper - 50).abs()) as u32
}
