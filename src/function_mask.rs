//! Reserved-module bookkeeping shared by the matrix builder and reader
//!
//! The builder reserves function patterns before placing data; the
//! reader reconstructs the same map to know which modules carry data.
//! Both sides also share the zig-zag traversal and the format/version
//! bit placements, so placement and extraction cannot drift apart.

use crate::models::{BitMatrix, Version};
use crate::tables;

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut mask = BitMatrix::square(size);

        // Finder patterns + separators (8x8 corner areas, format strips
        // reserved separately below)
        Self::mark_finder_area(&mut mask, 0, 0);
        Self::mark_finder_area(&mut mask, size - 7, 0);
        Self::mark_finder_area(&mut mask, 0, size - 7);

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        // Alignment patterns
        for (cx, cy) in alignment_centers(version) {
            for dy in 0..5 {
                for dx in 0..5 {
                    mask.set(cx - 2 + dx, cy - 2 + dy, true);
                }
            }
        }

        // Format info strips
        for i in 0..9 {
            if i != 6 {
                mask.set(8, i, true);
                mask.set(i, 8, true);
            }
        }
        for i in 0..8 {
            mask.set(size - 1 - i, 8, true);
            mask.set(8, size - 1 - i, true);
        }

        // Dark module
        mask.set(8, size - 8, true);

        // Version info blocks (v7+)
        if version.number() >= 7 {
            for dy in 0..6 {
                for dx in 0..3 {
                    mask.set(size - 11 + dx, dy, true);
                    mask.set(dx, size - 11 + dy, true);
                }
            }
        }

        Self { mask, version }
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Number of modules available to data and remainder bits.
    pub fn data_modules_count(&self) -> usize {
        let size = self.mask.width();
        size * size - self.mask.count_dark()
    }

    /// Data module coordinates in placement order: column pairs from the
    /// right edge, skipping the timing column, direction alternating per
    /// pair, right column before left within each row.
    pub fn zigzag_coordinates(&self) -> Vec<(usize, usize)> {
        let size = self.mask.width();
        let mut coords = Vec::with_capacity(self.data_modules_count());
        let mut upward = true;
        let mut col = size as isize - 1;

        while col > 0 {
            if col == 6 {
                col -= 1;
            }
            for step in 0..size {
                let y = if upward { size - 1 - step } else { step };
                for dx in 0..2 {
                    let x = (col - dx) as usize;
                    if !self.is_function(x, y) {
                        coords.push((x, y));
                    }
                }
            }
            upward = !upward;
            col -= 2;
        }

        coords
    }

    fn mark_finder_area(mask: &mut BitMatrix, x: usize, y: usize) {
        let size = mask.width();
        let start_x = x.saturating_sub(1);
        let start_y = y.saturating_sub(1);
        let end_x = (x + 8).min(size);
        let end_y = (y + 8).min(size);
        for yy in start_y..end_y {
            for xx in start_x..end_x {
                mask.set(xx, yy, true);
            }
        }
    }
}

/// Alignment pattern centers for a version, with the three that would
/// overlap finder corners removed.
pub fn alignment_centers(version: Version) -> Vec<(usize, usize)> {
    let size = version.size();
    let positions = tables::alignment_positions(version);
    let mut centers = Vec::new();
    for &cx in &positions {
        for &cy in &positions {
            let in_tl = cx <= 8 && cy <= 8;
            let in_tr = cx >= size - 9 && cy <= 8;
            let in_bl = cx <= 8 && cy >= size - 9;
            if in_tl || in_tr || in_bl {
                continue;
            }
            centers.push((cx, cy));
        }
    }
    centers
}

/// Module coordinates of format bit i (0 = LSB of the 15-bit word) for
/// the copy around the top-left finder.
pub fn format_position_main(i: usize) -> (usize, usize) {
    match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    }
}

/// Module coordinates of format bit i for the copy splayed across the
/// top-right and bottom-left finders.
pub fn format_position_second(i: usize, size: usize) -> (usize, usize) {
    if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    }
}

/// Module coordinates of version bit i (0 = LSB of the 18-bit word) in
/// the two 3x6 blocks. Returns (top_right, bottom_left).
pub fn version_positions(i: usize, size: usize) -> ((usize, usize), (usize, usize)) {
    let a = size - 11 + i % 3;
    let b = i / 3;
    ((a, b), (b, a))
}
