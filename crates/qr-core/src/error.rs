use thiserror::Error;

/// Errors raised by the encoding pipeline.
///
/// `Io` is not a member here — only the rendering boundary in `qr-dib`
/// performs I/O, and it wraps this type instead.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum Error {
    /// A constructor or builder argument was out of range or unrecognized.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The input does not fit under the given constraints: the maximum
    /// version with structured append disabled, or structured append would
    /// require more than 16 symbols.
    #[error("data length = {data_bits} bits exceeds capacity = {capacity_bits} bits at version {version}")]
    CapacityExceeded {
        data_bits: usize,
        capacity_bits: usize,
        version: u8,
    },

    /// A character cannot be represented in the configured byte-mode charset.
    #[error("character {char:?} is not encodable in charset {charset}")]
    EncodingFailed { char: char, charset: &'static str },
}
