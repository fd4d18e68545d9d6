/// Unmask QR code by applying the mask pattern
use crate::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

/// Unmask the matrix in place by XORing data modules with the mask
/// function; reserved modules are left untouched.
pub fn unmask(matrix: &mut BitMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    let size = matrix.width();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask_pattern.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}
