//! Splits data codewords into Reed-Solomon blocks, appends error correction
//! to each, and interleaves the result into the final codeword sequence
//! drawn onto the matrix (spec.md §4.5).

use crate::ecc_level::ErrorCorrectionLevel;
use crate::reed_solomon;
use crate::tables;
use crate::version::Version;

/// Splits `data` into the blocks prescribed for `(ver, ecl)`, appends a
/// Reed-Solomon remainder to each block, and interleaves the data and EC
/// codewords byte-by-byte across blocks, per ISO/IEC 18004 §6.6.
///
/// `data.len()` must equal `tables::num_data_codewords(ver, ecl)`.
pub(crate) fn add_ecc_and_interleave(data: &[u8], ver: Version, ecl: ErrorCorrectionLevel) -> Vec<u8> {
    assert_eq!(
        data.len(),
        tables::num_data_codewords(ver, ecl),
        "data codeword count mismatch"
    );

    let num_blocks = tables::num_error_correction_blocks(ver, ecl);
    let block_ecc_len = tables::ecc_codewords_per_block(ver, ecl);
    let raw_codewords = tables::num_raw_data_modules(ver) / 8;
    let num_short_blocks = num_blocks - raw_codewords % num_blocks;
    let short_block_len = raw_codewords / num_blocks;

    let mut blocks = Vec::<Vec<u8>>::with_capacity(num_blocks);
    let rs_divisor = reed_solomon::compute_divisor(block_ecc_len);
    let mut k = 0;
    for i in 0..num_blocks {
        let dat_len = short_block_len - block_ecc_len + usize::from(i >= num_short_blocks);
        let mut dat = data[k..k + dat_len].to_vec();
        k += dat_len;
        let ecc = reed_solomon::compute_remainder(&dat, &rs_divisor);
        if i < num_short_blocks {
            dat.push(0);
        }
        dat.extend_from_slice(&ecc);
        blocks.push(dat);
    }

    let mut result = Vec::<u8>::with_capacity(raw_codewords);
    for i in 0..=short_block_len {
        for (j, block) in blocks.iter().enumerate() {
            if i != short_block_len - block_ecc_len || j >= num_short_blocks {
                result.push(block[i]);
            }
        }
    }
    result
}
