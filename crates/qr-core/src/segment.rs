//! Segment data: per-mode character encoders and a finished `Segment`
//! record ready to be concatenated into a symbol's bit stream (spec.md
//! §4.1, §4.2).

use crate::bit_buffer::BitBuffer;
use crate::charset::ByteModeCharset;
use crate::kanji;
use crate::segment_mode::SegmentMode;

/// The set of legal characters in alphanumeric mode, where each character's
/// value is its index in this string.
pub static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Tests whether `c` can be encoded in numeric mode.
pub fn is_numeric(c: char) -> bool {
    c.is_ascii_digit()
}

/// Tests whether `c` can be encoded in alphanumeric mode.
pub fn is_alphanumeric(c: char) -> bool {
    ALPHANUMERIC_CHARSET.contains(c)
}

/// A finished segment of character data ready to be concatenated into a
/// symbol's data bit stream, alongside its own mode indicator and
/// character-count field.
#[derive(Clone, PartialEq, Eq)]
pub struct Segment {
    pub mode: SegmentMode,
    pub num_chars: usize,
    pub bits: Vec<bool>,
}

impl Segment {
    /// Encodes a run of ASCII digits in numeric mode: 3 digits per 10 bits,
    /// with a shorter final group of 1 or 2 digits packed into 4 or 7 bits.
    ///
    /// Panics if any character is not an ASCII digit.
    pub fn make_numeric(text: &str) -> Self {
        let mut bb = BitBuffer::with_capacity(text.len() * 3 + (text.len() + 2) / 3);
        let mut accum: u32 = 0;
        let mut count: u8 = 0;
        for b in text.bytes() {
            assert!(b.is_ascii_digit(), "string contains non-numeric characters");
            accum = accum * 10 + u32::from(b - b'0');
            count += 1;
            if count == 3 {
                bb.append_bits(accum, 10);
                accum = 0;
                count = 0;
            }
        }
        if count > 0 {
            bb.append_bits(accum, count * 3 + 1);
        }
        Segment {
            mode: SegmentMode::Numeric,
            num_chars: text.chars().count(),
            bits: bb.0,
        }
    }

    /// Encodes a run of alphanumeric characters: 2 characters per 11 bits,
    /// with a shorter final group of 1 character packed into 6 bits.
    ///
    /// Panics if any character is outside `ALPHANUMERIC_CHARSET`.
    pub fn make_alphanumeric(text: &str) -> Self {
        let mut bb = BitBuffer::with_capacity(text.len() * 5 + (text.len() + 1) / 2);
        let mut accum: u32 = 0;
        let mut count: u32 = 0;
        for c in text.chars() {
            let i = ALPHANUMERIC_CHARSET
                .find(c)
                .expect("string contains unencodable characters in alphanumeric mode");
            accum = accum * 45 + u32::try_from(i).unwrap();
            count += 1;
            if count == 2 {
                bb.append_bits(accum, 11);
                accum = 0;
                count = 0;
            }
        }
        if count > 0 {
            bb.append_bits(accum, 6);
        }
        Segment {
            mode: SegmentMode::Alphanumeric,
            num_chars: text.chars().count(),
            bits: bb.0,
        }
    }

    /// Encodes a run of characters in byte mode, using `charset` to turn
    /// each character into its encoded bytes.
    ///
    /// The byte-mode character-count-indicator counts emitted *bytes*, not
    /// characters, per ISO/IEC 18004 — a character that expands to more
    /// than one byte (e.g. non-Latin1 text under `Utf8`/`ShiftJis`) must
    /// still contribute its full byte length to `num_chars`.
    ///
    /// Returns `Error::EncodingFailed` at the first character `charset`
    /// cannot represent.
    pub fn make_byte(text: &str, charset: ByteModeCharset) -> Result<Self, crate::error::Error> {
        let mut bb = BitBuffer::with_capacity(text.len() * 8);
        let mut num_bytes = 0;
        for c in text.chars() {
            for b in charset.encode_char(c)? {
                bb.append_bits(u32::from(b), 8);
                num_bytes += 1;
            }
        }
        Ok(Segment {
            mode: SegmentMode::Byte,
            num_chars: num_bytes,
            bits: bb.0,
        })
    }

    /// Encodes a run of kanji characters, 13 bits each, per `kanji::kanji_value`.
    ///
    /// Panics if any character is not encodable in kanji mode.
    pub fn make_kanji(text: &str) -> Self {
        let mut bb = BitBuffer::with_capacity(text.chars().count() * 13);
        let mut num_chars = 0;
        for c in text.chars() {
            let value = kanji::kanji_value(c).expect("string contains non-kanji characters");
            bb.append_bits(u32::from(value), 13);
            num_chars += 1;
        }
        Segment {
            mode: SegmentMode::Kanji,
            num_chars,
            bits: bb.0,
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn pack_three_digits_per_ten_bits() {
        let seg = Segment::make_numeric("123");
        assert_eq!(10, seg.bits.len());
    }

    #[test]
    fn pack_remainder_of_two_digits_in_seven_bits() {
        let seg = Segment::make_numeric("12");
        assert_eq!(7, seg.bits.len());
    }

    #[test]
    fn pack_remainder_of_one_digit_in_four_bits() {
        let seg = Segment::make_numeric("7");
        assert_eq!(4, seg.bits.len());
    }

    #[test]
    #[should_panic(expected = "non-numeric")]
    fn reject_non_digit_in_numeric_mode() {
        Segment::make_numeric("12A");
    }

    #[test]
    fn pack_two_alphanumeric_chars_per_eleven_bits() {
        let seg = Segment::make_alphanumeric("AB");
        assert_eq!(11, seg.bits.len());
    }

    #[test]
    fn pack_alphanumeric_remainder_in_six_bits() {
        let seg = Segment::make_alphanumeric("A");
        assert_eq!(6, seg.bits.len());
    }

    #[test]
    fn encode_byte_mode_via_charset() {
        let seg = Segment::make_byte("AB", ByteModeCharset::Iso8859_1).unwrap();
        assert_eq!(16, seg.bits.len());
        assert_eq!(2, seg.num_chars);
    }

    #[test]
    fn count_byte_mode_char_count_in_bytes_not_characters() {
        // A single multibyte character must contribute its full byte length
        // to num_chars, since the char-count-indicator field is a byte
        // count for byte mode (ISO/IEC 18004), not a character count.
        let seg = Segment::make_byte("日", ByteModeCharset::Utf8).unwrap();
        assert_eq!(3, seg.num_chars);
        assert_eq!(24, seg.bits.len());
    }

    #[test]
    fn encode_kanji_thirteen_bits_each() {
        let seg = Segment::make_kanji("日本");
        assert_eq!(26, seg.bits.len());
        assert_eq!(2, seg.num_chars);
    }

    #[test]
    fn recognize_alphanumeric_predicate() {
        assert!(is_alphanumeric('$'));
        assert!(!is_alphanumeric('a'));
    }
}
