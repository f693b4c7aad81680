//! Assembles a symbol's finished segments (plus an optional structured-append
//! header) into the padded data codeword byte stream (spec.md §4.4).

use crate::bit_buffer::BitBuffer;
use crate::segment::Segment;
use crate::version::Version;

/// Assembles `segments` into the final data codewords for `version`,
/// prefixing `header` (the 20-bit structured-append header, when present),
/// then a terminator, bit padding, and alternating pad codewords up to
/// `capacity_bits`.
pub(crate) fn assemble(
    header: Option<&BitBuffer>,
    segments: &[Segment],
    version: Version,
    capacity_bits: usize,
) -> Vec<u8> {
    let mut bb = BitBuffer::new();
    if let Some(h) = header {
        bb.0.extend(h.0.iter());
    }
    for seg in segments {
        bb.append_bits(seg.mode.mode_bits(), 4);
        bb.append_bits(
            u32::try_from(seg.num_chars).expect("segment character count exceeds u32"),
            seg.mode.num_char_count_bits(version),
        );
        bb.0.extend(seg.bits.iter());
    }
    debug_assert!(bb.len() <= capacity_bits);

    // Terminator: up to 4 zero bits, capped by remaining capacity.
    let num_zero_bits = (capacity_bits - bb.len()).min(4);
    bb.append_bits(0, num_zero_bits as u8);

    // Pad to the next byte boundary.
    let pad_bits = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, pad_bits as u8);
    debug_assert_eq!(bb.len() % 8, 0);

    // Pad codewords: alternate 0xEC, 0x11 until capacity is reached.
    for &pad_byte in [0xECu32, 0x11].iter().cycle() {
        if bb.len() >= capacity_bits {
            break;
        }
        bb.append_bits(pad_byte, 8);
    }

    bb.to_bytes()
}
