//! Encodes text into QR Code Model 2 (ISO/IEC 18004) symbols.
//!
//! This crate implements the encoding pipeline only: mode selection, bit
//! stream assembly, Reed-Solomon error correction, module placement,
//! masking, and structured-append splitting. It produces module matrices;
//! rendering those to an image format is the job of a separate crate (see
//! `qr-dib` for Windows DIB/BMP output).
//!
//! # Example
//!
//! ```
//! use qr_core::{ByteModeCharset, ErrorCorrectionLevel, Symbols};
//!
//! let mut symbols = Symbols::new(ErrorCorrectionLevel::Medium, 40, false, ByteModeCharset::Iso8859_1)
//!     .unwrap();
//! symbols.append_string("Hello, world!").unwrap();
//! let symbol = symbols.get(0);
//! for y in 0..symbol.size() {
//!     for x in 0..symbol.size() {
//!         let _dark = symbol.get_module(x, y);
//!     }
//! }
//! ```

mod bit_buffer;
mod builder;
mod charset;
mod ecc_blocks;
mod ecc_level;
mod error;
mod kanji;
mod mask;
mod masking;
mod matrix;
mod message;
mod penalty;
mod reed_solomon;
mod segment;
mod segment_mode;
mod symbols;
mod tables;
mod version;

pub use charset::ByteModeCharset;
pub use ecc_level::ErrorCorrectionLevel;
pub use error::Error;
pub use mask::Mask;
pub use segment_mode::SegmentMode;
pub use symbols::{Symbol, Symbols};
pub use version::Version;

pub use bit_buffer::BitBuffer;
pub use segment::Segment;
