/// The error correction level used in a QR Code symbol.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum ErrorCorrectionLevel {
    /// Tolerates about 7% erroneous codewords.
    Low,
    /// Tolerates about 15% erroneous codewords.
    Medium,
    /// Tolerates about 25% erroneous codewords.
    Quartile,
    /// Tolerates about 30% erroneous codewords.
    High,
}

impl ErrorCorrectionLevel {
    // Index into the per-level rows of the capacity tables.
    pub(crate) fn ordinal(self) -> usize {
        use ErrorCorrectionLevel::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    // The 2-bit value stored in format info.
    pub(crate) fn format_bits(self) -> u32 {
        use ErrorCorrectionLevel::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }
}
