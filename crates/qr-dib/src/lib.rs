//! Renders `qr_core::Symbol` module matrices to legacy Windows DIB/BMP
//! bitmaps: 1-bit-per-pixel (monochrome, 2-entry palette) and 24-bit
//! (BGR) variants, per spec.md §4.10 and §6.
//!
//! The exact legacy byte layout (62-byte mono header, bottom-up row order,
//! 4-byte row padding) is hand-rolled rather than produced by the generic
//! `image` crate's BMP encoder, which does not expose this format.

mod error;

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub use error::Error;
use qr_core::Symbol;

/// Mandatory light border around the symbol, in modules.
pub const QUIET_ZONE_MODULES: i32 = 4;

fn parse_hex_color(s: &str) -> Result<(u8, u8, u8), Error> {
    let invalid = || qr_core::Error::InvalidArgument(format!("invalid color string {s:?}"));
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 {
        return Err(invalid().into());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
    Ok((r, g, b))
}

fn validate_module_size(module_size: u32) -> Result<(), Error> {
    if module_size < 1 {
        return Err(qr_core::Error::InvalidArgument("module_size must be >= 1".into()).into());
    }
    Ok(())
}

// Returns true (dark) for a pixel at (px, py) in the full quiet-zoned,
// module_size-magnified image, by mapping back to the underlying symbol.
fn dark_at(symbol: &Symbol, module_size: u32, px: i32, py: i32) -> bool {
    let module_x = px / module_size as i32 - QUIET_ZONE_MODULES;
    let module_y = py / module_size as i32 - QUIET_ZONE_MODULES;
    symbol.get_module(module_x, module_y)
}

fn rendered_side_px(symbol: &Symbol, module_size: u32) -> u32 {
    (symbol.size() as u32 + 2 * QUIET_ZONE_MODULES as u32) * module_size
}

fn file_header(total_size: u32, offset_bits: u32) -> [u8; 14] {
    let mut h = [0u8; 14];
    h[0] = b'B';
    h[1] = b'M';
    h[2..6].copy_from_slice(&total_size.to_le_bytes());
    h[10..14].copy_from_slice(&offset_bits.to_le_bytes());
    h
}

fn info_header(width: u32, height: u32, bit_count: u16, colors_used: u32) -> [u8; 40] {
    let mut h = [0u8; 40];
    h[0..4].copy_from_slice(&40u32.to_le_bytes());
    h[4..8].copy_from_slice(&(width as i32).to_le_bytes());
    h[8..12].copy_from_slice(&(height as i32).to_le_bytes()); // positive: bottom-up
    h[12..14].copy_from_slice(&1u16.to_le_bytes()); // planes
    h[14..16].copy_from_slice(&bit_count.to_le_bytes());
    // compression (0 = BI_RGB), left as 0
    h[36..40].copy_from_slice(&colors_used.to_le_bytes());
    h
}

/// Renders `symbol` to a 1-bit-per-pixel (monochrome) DIB, including a
/// 4-module quiet zone, magnified `module_size` pixels per module.
///
/// `fore`/`back` are `#RRGGBB` hex strings for the dark/light colors.
pub fn get_1bpp_dib(
    symbol: &Symbol,
    module_size: u32,
    fore: &str,
    back: &str,
) -> Result<Vec<u8>, Error> {
    validate_module_size(module_size)?;
    let (fr, fg, fb) = parse_hex_color(fore)?;
    let (br, bg, bb) = parse_hex_color(back)?;

    let side = rendered_side_px(symbol, module_size);
    let row_bytes_unpadded = ((side as usize) + 7) / 8;
    let row_stride = (row_bytes_unpadded + 3) & !3;
    let pixel_data_size = row_stride * side as usize;

    let palette_size = 8; // 2 entries * 4 bytes (BGR0)
    let header_size = 14 + 40 + palette_size;
    let mut out = Vec::with_capacity(header_size + pixel_data_size);

    out.extend_from_slice(&file_header(
        (header_size + pixel_data_size) as u32,
        header_size as u32,
    ));
    out.extend_from_slice(&info_header(side, side, 1, 2));
    // Palette: index 0 = back, index 1 = fore, each stored BGR0.
    out.extend_from_slice(&[bb, bg, br, 0]);
    out.extend_from_slice(&[fb, fg, fr, 0]);

    let mut rows = vec![0u8; pixel_data_size];
    // Rows are stored bottom-up: file row 0 is the bottommost image row.
    for file_row in 0..side {
        let image_row = side - 1 - file_row;
        let row_start = file_row as usize * row_stride;
        for px in 0..side {
            if dark_at(symbol, module_size, px as i32, image_row as i32) {
                let byte_index = row_start + (px as usize >> 3);
                rows[byte_index] |= 0x80 >> (px % 8);
            }
        }
    }
    out.extend_from_slice(&rows);
    Ok(out)
}

/// Renders `symbol` to a 24-bit-per-pixel (BGR) DIB, including a 4-module
/// quiet zone, magnified `module_size` pixels per module.
pub fn get_24bpp_dib(
    symbol: &Symbol,
    module_size: u32,
    fore: &str,
    back: &str,
) -> Result<Vec<u8>, Error> {
    validate_module_size(module_size)?;
    let (fr, fg, fb) = parse_hex_color(fore)?;
    let (br, bg, bb) = parse_hex_color(back)?;

    let side = rendered_side_px(symbol, module_size);
    let row_stride = ((side as usize * 3) + 3) & !3;
    let pixel_data_size = row_stride * side as usize;

    let header_size = 14 + 40;
    let mut out = Vec::with_capacity(header_size + pixel_data_size);
    out.extend_from_slice(&file_header(
        (header_size + pixel_data_size) as u32,
        header_size as u32,
    ));
    out.extend_from_slice(&info_header(side, side, 24, 0));

    let mut rows = vec![0u8; pixel_data_size];
    for file_row in 0..side {
        let image_row = side - 1 - file_row;
        let row_start = file_row as usize * row_stride;
        for px in 0..side {
            let (b, g, r) = if dark_at(symbol, module_size, px as i32, image_row as i32) {
                (fb, fg, fr)
            } else {
                (bb, bg, br)
            };
            let pixel_index = row_start + px as usize * 3;
            rows[pixel_index] = b;
            rows[pixel_index + 1] = g;
            rows[pixel_index + 2] = r;
        }
    }
    out.extend_from_slice(&rows);
    Ok(out)
}

/// Renders and writes a 1bpp DIB to `path`.
pub fn save_1bpp_dib(
    symbol: &Symbol,
    module_size: u32,
    fore: &str,
    back: &str,
    path: impl AsRef<Path>,
) -> Result<(), Error> {
    let bytes = get_1bpp_dib(symbol, module_size, fore, back)?;
    File::create(path)?.write_all(&bytes)?;
    Ok(())
}

/// Renders and writes a 24bpp DIB to `path`.
pub fn save_24bpp_dib(
    symbol: &Symbol,
    module_size: u32,
    fore: &str,
    back: &str,
    path: impl AsRef<Path>,
) -> Result<(), Error> {
    let bytes = get_24bpp_dib(symbol, module_size, fore, back)?;
    File::create(path)?.write_all(&bytes)?;
    Ok(())
}

#[cfg(test)]
mod should {
    use super::*;
    use qr_core::{ByteModeCharset, ErrorCorrectionLevel, Symbols};

    fn sample_symbol() -> Symbol {
        let mut syms =
            Symbols::new(ErrorCorrectionLevel::Medium, 40, false, ByteModeCharset::Iso8859_1)
                .unwrap();
        syms.append_string("01234567").unwrap();
        syms.get(0)
    }

    #[test]
    fn produce_file_header_with_bm_magic() {
        let sym = sample_symbol();
        let bytes = get_1bpp_dib(&sym, 4, "#000000", "#FFFFFF").unwrap();
        assert_eq!(b'B', bytes[0]);
        assert_eq!(b'M', bytes[1]);
    }

    #[test]
    fn pad_24bpp_rows_to_four_byte_multiple() {
        let sym = sample_symbol();
        let bytes = get_24bpp_dib(&sym, 1, "#000000", "#FFFFFF").unwrap();
        let side = rendered_side_px(&sym, 1);
        let row_stride = ((side as usize * 3) + 3) & !3;
        let expected_len = 14 + 40 + row_stride * side as usize;
        assert_eq!(expected_len, bytes.len());
    }

    #[test]
    fn produce_idempotent_output() {
        let sym = sample_symbol();
        let a = get_24bpp_dib(&sym, 4, "#000000", "#FFFFFF").unwrap();
        let b = get_24bpp_dib(&sym, 4, "#000000", "#FFFFFF").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reject_module_size_zero() {
        let sym = sample_symbol();
        assert!(get_1bpp_dib(&sym, 0, "#000000", "#FFFFFF").is_err());
    }

    #[test]
    fn reject_malformed_color_string() {
        let sym = sample_symbol();
        assert!(get_1bpp_dib(&sym, 4, "black", "#FFFFFF").is_err());
    }

    #[test]
    fn use_sixty_two_byte_header_for_monochrome() {
        let sym = sample_symbol();
        let bytes = get_1bpp_dib(&sym, 1, "#000000", "#FFFFFF").unwrap();
        let offset = u32::from_le_bytes(bytes[10..14].try_into().unwrap());
        assert_eq!(62, offset);
    }
}
