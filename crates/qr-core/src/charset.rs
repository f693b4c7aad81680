use crate::error::Error;

/// The 8-bit character set used to encode Byte-mode segments (and to derive
/// the per-character bytes used in structured-append parity accounting for
/// every mode, per spec.md §4.4 and §8).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ByteModeCharset {
    /// Default. Every code point in 0..=0xFF maps to the single byte of the
    /// same value; anything above that range is unencodable.
    #[default]
    Iso8859_1,
    /// Native UTF-8, via `char::encode_utf8`. Never fails.
    Utf8,
    /// Shift-JIS, via `encoding_rs::SHIFT_JIS`.
    ShiftJis,
}

impl ByteModeCharset {
    pub(crate) fn name(self) -> &'static str {
        match self {
            ByteModeCharset::Iso8859_1 => "ISO-8859-1",
            ByteModeCharset::Utf8 => "UTF-8",
            ByteModeCharset::ShiftJis => "Shift-JIS",
        }
    }

    /// Encodes a single character to the bytes this charset would produce
    /// for it, or `Error::EncodingFailed` if the character is outside the
    /// charset's repertoire.
    pub fn encode_char(self, c: char) -> Result<Vec<u8>, Error> {
        match self {
            ByteModeCharset::Iso8859_1 => {
                let v = u32::from(c);
                if v <= 0xFF {
                    Ok(vec![v as u8])
                } else {
                    Err(Error::EncodingFailed {
                        char: c,
                        charset: self.name(),
                    })
                }
            }
            ByteModeCharset::Utf8 => {
                let mut buf = [0u8; 4];
                Ok(c.encode_utf8(&mut buf).as_bytes().to_vec())
            }
            ByteModeCharset::ShiftJis => {
                let mut s = [0u8; 4];
                let text = c.encode_utf8(&mut s);
                let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
                if had_errors {
                    Err(Error::EncodingFailed {
                        char: c,
                        charset: self.name(),
                    })
                } else {
                    Ok(bytes.into_owned())
                }
            }
        }
    }

    /// Tests whether `c` can be represented in this charset, without
    /// allocating the encoded bytes.
    pub fn accepts(self, c: char) -> bool {
        match self {
            ByteModeCharset::Iso8859_1 => u32::from(c) <= 0xFF,
            ByteModeCharset::Utf8 => true,
            ByteModeCharset::ShiftJis => {
                let mut s = [0u8; 4];
                let text = c.encode_utf8(&mut s);
                !encoding_rs::SHIFT_JIS.encode(text).2
            }
        }
    }

    /// Parses a host-recognized charset name, case-insensitively accepting
    /// a handful of common aliases. Used by callers building `Symbols` from
    /// user-facing configuration strings.
    pub fn parse(name: &str) -> Result<Self, Error> {
        match name.to_ascii_uppercase().replace('_', "-").as_str() {
            "ISO-8859-1" | "LATIN1" | "LATIN-1" => Ok(ByteModeCharset::Iso8859_1),
            "UTF-8" | "UTF8" => Ok(ByteModeCharset::Utf8),
            "SHIFT-JIS" | "SHIFTJIS" | "SJIS" => Ok(ByteModeCharset::ShiftJis),
            other => Err(Error::InvalidArgument(format!(
                "unrecognized byte-mode charset {other:?}"
            ))),
        }
    }
}
