use crate::version::Version;

/// The mode a segment's data is encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentMode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
}

impl SegmentMode {
    /// All modes, ordered by compactness as spec.md §4.1 ranks them:
    /// Numeric first (most compact), Byte last (least compact / most
    /// permissive). Used to pick the best mode among those that accept a
    /// given character.
    pub const COMPACTNESS_ORDER: [SegmentMode; 4] = [
        SegmentMode::Numeric,
        SegmentMode::Alphanumeric,
        SegmentMode::Kanji,
        SegmentMode::Byte,
    ];

    // The 4-bit mode indicator value.
    pub(crate) fn mode_bits(self) -> u32 {
        match self {
            SegmentMode::Numeric => 0x1,
            SegmentMode::Alphanumeric => 0x2,
            SegmentMode::Byte => 0x4,
            SegmentMode::Kanji => 0x8,
        }
    }

    /// The bit width of the character-count-indicator field for this mode at
    /// the given version. One of three standard bands: versions 1-9, 10-26,
    /// 27-40.
    pub fn num_char_count_bits(self, ver: Version) -> u8 {
        let bands: [u8; 3] = match self {
            SegmentMode::Numeric => [10, 12, 14],
            SegmentMode::Alphanumeric => [9, 11, 13],
            SegmentMode::Byte => [8, 16, 16],
            SegmentMode::Kanji => [8, 10, 12],
        };
        bands[ver.band()]
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn widen_char_count_field_past_version_nine() {
        assert_eq!(10, SegmentMode::Numeric.num_char_count_bits(Version::new(9)));
        assert_eq!(12, SegmentMode::Numeric.num_char_count_bits(Version::new(10)));
    }

    #[test]
    fn widen_char_count_field_past_version_twenty_six() {
        assert_eq!(11, SegmentMode::Alphanumeric.num_char_count_bits(Version::new(26)));
        assert_eq!(13, SegmentMode::Alphanumeric.num_char_count_bits(Version::new(27)));
    }

    #[test]
    fn order_modes_by_compactness() {
        assert_eq!(SegmentMode::Numeric, SegmentMode::COMPACTNESS_ORDER[0]);
        assert_eq!(SegmentMode::Byte, SegmentMode::COMPACTNESS_ORDER[3]);
    }
}
