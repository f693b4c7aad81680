//! Capacity and format tables: per-version/per-ECC-level codeword and block
//! counts, alignment pattern centres, and the derived data capacity.

use crate::ecc_level::ErrorCorrectionLevel;
use crate::version::Version;

// For use in penalty scoring, when evaluating which mask is best.
pub(crate) const PENALTY_N1: i32 = 3;
pub(crate) const PENALTY_N2: i32 = 3;
pub(crate) const PENALTY_N3: i32 = 40;
pub(crate) const PENALTY_N4: i32 = 10;

#[rustfmt::skip]
static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // Version:      0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15  16  17  18  19  20  21  22  23  24  25  26  27  28  29  30  31  32  33  34  35  36  37  38  39  40
    [-1,  7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Low
    [-1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28], // Medium
    [-1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Quartile
    [-1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // High
];

#[rustfmt::skip]
static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    // Version:     0  1  2  3  4  5  6  7  8  9 10  11  12  13  14  15  16  17  18  19  20  21  22  23  24  25  26  27  28  29  30  31  32  33  34  35  36  37  38  39  40
    [-1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4,  4,  4,  4,  4,  6,  6,  6,  6,  7,  8,  8,  9,  9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25], // Low
    [-1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5,  5,  8,  9,  9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49], // Medium
    [-1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8,  8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68], // Quartile
    [-1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81], // High
];

fn table_get(table: &'static [[i8; 41]; 4], ver: Version, ecl: ErrorCorrectionLevel) -> usize {
    table[ecl.ordinal()][usize::from(ver.value())] as usize
}

/// The number of Reed-Solomon blocks data is split into for `(ver, ecl)`.
pub fn num_error_correction_blocks(ver: Version, ecl: ErrorCorrectionLevel) -> usize {
    table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
}

/// The number of EC codewords appended to each block for `(ver, ecl)`.
pub fn ecc_codewords_per_block(ver: Version, ecl: ErrorCorrectionLevel) -> usize {
    table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl)
}

/// Ascending list of alignment pattern centre coordinates for `ver`, used on
/// both axes. Empty for version 1, which has no alignment patterns.
pub fn alignment_pattern_positions(ver: Version) -> Vec<i32> {
    let v = ver.value();
    if v == 1 {
        return Vec::new();
    }
    let num_align = i32::from(v) / 7 + 2;
    let step = if v == 32 {
        26
    } else {
        (i32::from(v) * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };
    let size = ver.size();
    let mut result: Vec<i32> = (0..num_align - 1).map(|i| size - 7 - i * step).collect();
    result.push(6);
    result.reverse();
    result
}

/// The number of data bits a symbol of this version can hold once all
/// function modules are excluded, including any trailing remainder bits.
/// In the range [208, 29648]; not necessarily a multiple of 8.
pub fn num_raw_data_modules(ver: Version) -> usize {
    let v = usize::from(ver.value());
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36; // two 3x6 version-info blocks
        }
    }
    debug_assert!((208..=29648).contains(&result));
    result
}

/// The number of 8-bit data codewords (excluding error correction) a symbol
/// of `(ver, ecl)` can hold, with remainder bits discarded.
pub fn num_data_codewords(ver: Version, ecl: ErrorCorrectionLevel) -> usize {
    num_raw_data_modules(ver) / 8 - ecc_codewords_per_block(ver, ecl) * num_error_correction_blocks(ver, ecl)
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn report_no_alignment_patterns_at_version_one() {
        assert!(alignment_pattern_positions(Version::new(1)).is_empty());
    }

    #[test]
    fn report_alignment_centres_at_version_two() {
        assert_eq!(vec![6, 18], alignment_pattern_positions(Version::new(2)));
    }

    #[test]
    fn report_raw_data_modules_bounds() {
        assert_eq!(208, num_raw_data_modules(Version::new(1)));
        assert_eq!(29648, num_raw_data_modules(Version::new(40)));
    }

    #[test]
    fn report_data_codewords_for_version_one_low() {
        // Version 1-L: 19 data codewords (26 total - 7 ec)
        assert_eq!(
            19,
            num_data_codewords(Version::new(1), ErrorCorrectionLevel::Low)
        );
    }
}
