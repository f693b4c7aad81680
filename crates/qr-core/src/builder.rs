//! Greedy per-character mode selection, version escalation, and segment
//! accumulation for a single in-progress symbol (spec.md §4.1-§4.3, §9).

use crate::charset::ByteModeCharset;
use crate::ecc_level::ErrorCorrectionLevel;
use crate::error::Error;
use crate::kanji;
use crate::segment::{self, Segment};
use crate::segment_mode::SegmentMode;
use crate::tables;
use crate::version::Version;

/// A not-yet-encoded run of same-mode characters, growing one character at
/// a time. Its bit cost is computed from counters rather than by encoding
/// eagerly, since the tentative cost of a partial group is always equal to
/// its eventual flushed cost (see the per-mode formulas in §4.2).
#[derive(Clone)]
struct PendingSegment {
    mode: SegmentMode,
    text: String,
    char_count: usize,
    byte_len: usize,
}

impl PendingSegment {
    fn new(mode: SegmentMode, c: char, byte_len: usize) -> Self {
        let mut text = String::new();
        text.push(c);
        Self {
            mode,
            text,
            char_count: 1,
            byte_len,
        }
    }

    fn with_char(&self, c: char, extra_bytes: usize) -> Self {
        let mut text = self.text.clone();
        text.push(c);
        Self {
            mode: self.mode,
            text,
            char_count: self.char_count + 1,
            byte_len: self.byte_len + extra_bytes,
        }
    }

    fn tentative_bits(&self) -> usize {
        match self.mode {
            SegmentMode::Numeric => {
                10 * (self.char_count / 3) + [0, 4, 7][self.char_count % 3]
            }
            SegmentMode::Alphanumeric => 11 * (self.char_count / 2) + 6 * (self.char_count % 2),
            SegmentMode::Byte => self.byte_len * 8,
            SegmentMode::Kanji => 13 * self.char_count,
        }
    }

    fn header_bits(&self, ver: Version) -> usize {
        4 + usize::from(self.mode.num_char_count_bits(ver))
    }

    fn total_bits(&self, ver: Version) -> usize {
        self.header_bits(ver) + self.tentative_bits()
    }

    fn finalize(&self, charset: ByteModeCharset) -> Result<Segment, Error> {
        match self.mode {
            SegmentMode::Numeric => Ok(Segment::make_numeric(&self.text)),
            SegmentMode::Alphanumeric => Ok(Segment::make_alphanumeric(&self.text)),
            SegmentMode::Kanji => Ok(Segment::make_kanji(&self.text)),
            SegmentMode::Byte => Segment::make_byte(&self.text, charset),
        }
    }
}

fn mode_accepts(mode: SegmentMode, c: char, charset: ByteModeCharset) -> bool {
    match mode {
        SegmentMode::Numeric => segment::is_numeric(c),
        SegmentMode::Alphanumeric => segment::is_alphanumeric(c),
        SegmentMode::Kanji => kanji::is_kanji(c),
        SegmentMode::Byte => charset.accepts(c),
    }
}

fn pick_mode(c: char, charset: ByteModeCharset) -> Result<SegmentMode, Error> {
    SegmentMode::COMPACTNESS_ORDER
        .into_iter()
        .find(|&m| mode_accepts(m, c, charset))
        .ok_or(Error::EncodingFailed {
            char: c,
            charset: charset.name(),
        })
}

/// An in-progress symbol: accumulates segments character by character,
/// escalating its version as needed, up to `max_version`.
pub(crate) struct SymbolBuilder {
    version: Version,
    max_version: Version,
    ecl: ErrorCorrectionLevel,
    byte_charset: ByteModeCharset,
    reserve_structured_append: bool,
    segments: Vec<PendingSegment>,
}

impl SymbolBuilder {
    pub(crate) fn new(
        min_version: Version,
        max_version: Version,
        ecl: ErrorCorrectionLevel,
        byte_charset: ByteModeCharset,
        reserve_structured_append: bool,
    ) -> Self {
        Self {
            version: min_version,
            max_version,
            ecl,
            byte_charset,
            reserve_structured_append,
            segments: Vec::new(),
        }
    }

    pub(crate) fn version(&self) -> Version {
        self.version
    }

    fn capacity_bits(&self, ver: Version) -> usize {
        let total = 8 * tables::num_data_codewords(ver, self.ecl);
        if self.reserve_structured_append {
            total.saturating_sub(20)
        } else {
            total
        }
    }

    fn fits(&self, ver: Version, segments: &[PendingSegment]) -> bool {
        let used: usize = segments.iter().map(|s| s.total_bits(ver)).sum();
        used <= self.capacity_bits(ver)
    }

    /// Attempts to append one character, escalating the version as needed.
    /// On failure (max version exhausted, or the character is unencodable
    /// in every mode), `self` is left unchanged. On success, returns the
    /// mode the character was ultimately encoded in.
    pub(crate) fn try_append_char(&mut self, c: char) -> Result<SegmentMode, Error> {
        let chosen_mode = match self.segments.last() {
            Some(last) if mode_accepts(last.mode, c, self.byte_charset) => last.mode,
            _ => pick_mode(c, self.byte_charset)?,
        };

        let mut trial = self.segments.clone();
        match trial.last_mut() {
            Some(last) if last.mode == chosen_mode => {
                let extra_bytes = if chosen_mode == SegmentMode::Byte {
                    self.byte_charset.encode_char(c)?.len()
                } else {
                    0
                };
                *last = last.with_char(c, extra_bytes);
            }
            _ => {
                let byte_len = if chosen_mode == SegmentMode::Byte {
                    self.byte_charset.encode_char(c)?.len()
                } else {
                    0
                };
                trial.push(PendingSegment::new(chosen_mode, c, byte_len));
            }
        }

        let mut ver = self.version;
        while !self.fits(ver, &trial) {
            if ver.value() >= self.max_version.value() {
                let used: usize = trial.iter().map(|s| s.total_bits(ver)).sum();
                return Err(Error::CapacityExceeded {
                    data_bits: used,
                    capacity_bits: self.capacity_bits(ver),
                    version: ver.value(),
                });
            }
            ver = ver.next().unwrap();
        }
        if ver != self.version {
            log::debug!(
                "escalated version {} -> {} to fit {} segments",
                self.version.value(),
                ver.value(),
                trial.len()
            );
        }

        self.version = ver;
        self.segments = trial;
        Ok(chosen_mode)
    }

    /// Finishes this builder's segments into a form ready for message
    /// assembly, encoding each against the final chosen version.
    pub(crate) fn finalize_segments(&self) -> Result<Vec<Segment>, Error> {
        self.segments
            .iter()
            .map(|s| s.finalize(self.byte_charset))
            .collect()
    }
}

#[cfg(test)]
mod should {
    use super::*;

    fn builder() -> SymbolBuilder {
        SymbolBuilder::new(
            Version::new(1),
            Version::new(40),
            ErrorCorrectionLevel::Medium,
            ByteModeCharset::Iso8859_1,
            false,
        )
    }

    #[test]
    fn stay_in_numeric_mode_for_digit_run() {
        let mut b = builder();
        for c in "12345".chars() {
            b.try_append_char(c).unwrap();
        }
        assert_eq!(1, b.segments.len());
        assert_eq!(SegmentMode::Numeric, b.segments[0].mode);
    }

    #[test]
    fn switch_mode_when_current_mode_rejects_char() {
        let mut b = builder();
        for c in "123".chars() {
            b.try_append_char(c).unwrap();
        }
        b.try_append_char('A').unwrap();
        assert_eq!(2, b.segments.len());
        assert_eq!(SegmentMode::Alphanumeric, b.segments[1].mode);
    }

    #[test]
    fn prefer_most_compact_mode_for_fresh_segment() {
        let mut b = builder();
        b.try_append_char('5').unwrap();
        assert_eq!(SegmentMode::Numeric, b.segments[0].mode);
    }

    #[test]
    fn continue_in_current_mode_even_if_less_compact_available() {
        // A digit appended mid-alphanumeric-run stays alphanumeric: locality
        // beats global compaction (spec.md §9).
        let mut b = builder();
        b.try_append_char('A').unwrap();
        b.try_append_char('1').unwrap();
        assert_eq!(1, b.segments.len());
        assert_eq!(SegmentMode::Alphanumeric, b.segments[0].mode);
    }

    #[test]
    fn escalate_version_when_capacity_exceeded() {
        let mut b = SymbolBuilder::new(
            Version::new(1),
            Version::new(40),
            ErrorCorrectionLevel::High,
            ByteModeCharset::Iso8859_1,
            false,
        );
        for c in "0".repeat(50).chars() {
            b.try_append_char(c).unwrap();
        }
        assert!(b.version().value() > 1);
    }

    #[test]
    fn fail_when_max_version_exhausted() {
        let mut b = SymbolBuilder::new(
            Version::new(1),
            Version::new(1),
            ErrorCorrectionLevel::High,
            ByteModeCharset::Iso8859_1,
            false,
        );
        let mut last_err = None;
        for c in "0".repeat(200).chars() {
            if let Err(e) = b.try_append_char(c) {
                last_err = Some(e);
                break;
            }
        }
        assert!(matches!(last_err, Some(Error::CapacityExceeded { .. })));
    }
}
