//! Mask application and penalty scoring: applies all 8 mask patterns,
//! scores each, and selects the lowest-penalty (ties broken by lowest
//! reference number) mask (spec.md §4.7, §4.8).

use crate::ecc_level::ErrorCorrectionLevel;
use crate::mask::Mask;
use crate::matrix::Matrix;
use crate::penalty::RunHistory;
use crate::tables::{PENALTY_N1, PENALTY_N2, PENALTY_N3, PENALTY_N4};

/// XORs the codeword modules of `m` with `mask`'s condition. Idempotent:
/// applying the same mask twice undoes it, since XOR is its own inverse.
pub(crate) fn apply_mask(m: &mut Matrix, mask: Mask) {
    for y in 0..m.size {
        for x in 0..m.size {
            let invert = mask.invert_at(x, y);
            let is_function = m.is_function[(y * m.size + x) as usize];
            let idx = (y * m.size + x) as usize;
            m.modules[idx] ^= invert & !is_function;
        }
    }
}

/// Scores the current state of `m` per the four ISO/IEC 18004 penalty
/// rules. Lower is better. Mask must already be applied and format bits
/// drawn (format bits are function modules and excluded from scoring).
pub(crate) fn penalty_score(m: &Matrix) -> i32 {
    let mut result: i32 = 0;
    let size = m.size;

    for y in 0..size {
        let mut run_color = false;
        let mut run_x: i32 = 0;
        let mut history = RunHistory::new(size);
        for x in 0..size {
            if m.get(x, y) == run_color {
                run_x += 1;
                if run_x == 5 {
                    result += PENALTY_N1;
                } else if run_x > 5 {
                    result += 1;
                }
            } else {
                history.add(run_x);
                if !run_color {
                    result += history.count_patterns() * PENALTY_N3;
                }
                run_color = m.get(x, y);
                run_x = 1;
            }
        }
        result += history.terminate_and_count(run_color, run_x) * PENALTY_N3;
    }

    for x in 0..size {
        let mut run_color = false;
        let mut run_y: i32 = 0;
        let mut history = RunHistory::new(size);
        for y in 0..size {
            if m.get(x, y) == run_color {
                run_y += 1;
                if run_y == 5 {
                    result += PENALTY_N1;
                } else if run_y > 5 {
                    result += 1;
                }
            } else {
                history.add(run_y);
                if !run_color {
                    result += history.count_patterns() * PENALTY_N3;
                }
                run_color = m.get(x, y);
                run_y = 1;
            }
        }
        result += history.terminate_and_count(run_color, run_y) * PENALTY_N3;
    }

    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = m.get(x, y);
            if color == m.get(x + 1, y) && color == m.get(x, y + 1) && color == m.get(x + 1, y + 1) {
                result += PENALTY_N2;
            }
        }
    }

    let dark: i32 = m.modules.iter().copied().map(i32::from).sum();
    let total = size * size;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    debug_assert!((0..=9).contains(&k));
    result += k * PENALTY_N4;
    debug_assert!((0..=2_568_888).contains(&result));
    result
}

/// Applies masks 0..=7 in turn, scoring each, and returns the lowest-penalty
/// mask (lowest reference number wins ties, matching iteration order since
/// only strict improvements update the running best). Leaves `m` masked
/// with the chosen mask and its format bits drawn.
pub(crate) fn choose_best_mask(m: &mut Matrix, ecl: ErrorCorrectionLevel) -> Mask {
    let mut best = Mask::new(0);
    let mut best_penalty = i32::MAX;
    for i in 0u8..8 {
        let candidate = Mask::new(i);
        apply_mask(m, candidate);
        m.draw_format_bits(ecl, candidate);
        let penalty = penalty_score(m);
        if penalty < best_penalty {
            best = candidate;
            best_penalty = penalty;
        }
        apply_mask(m, candidate); // undo, since XOR is self-inverse
    }
    apply_mask(m, best);
    m.draw_format_bits(ecl, best);
    log::trace!("selected mask {} with penalty {}", best.value(), best_penalty);
    best
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::version::Version;

    #[test]
    fn select_a_mask_in_range() {
        let mut m = Matrix::new(Version::new(1));
        m.draw_function_patterns(Version::new(1), ErrorCorrectionLevel::Low);
        let mask = choose_best_mask(&mut m, ErrorCorrectionLevel::Low);
        assert!(mask.value() <= 7);
    }

    #[test]
    fn applying_mask_twice_is_identity() {
        let mut m = Matrix::new(Version::new(1));
        m.draw_function_patterns(Version::new(1), ErrorCorrectionLevel::Low);
        let before = m.modules.clone();
        apply_mask(&mut m, Mask::new(3));
        apply_mask(&mut m, Mask::new(3));
        assert_eq!(before, m.modules);
    }
}
