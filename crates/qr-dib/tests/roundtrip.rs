//! Round-trips a rendered symbol through a third-party QR decoder, per
//! spec.md §8 ("the encoded byte stream round-trips through a third-party
//! QR decoder to the original string").

use qr_core::{ByteModeCharset, ErrorCorrectionLevel, Symbols};

fn decode_bmp(path: &std::path::Path) -> String {
    let result = rxing::helpers::detect_in_file(
        path.to_str().expect("path is valid utf-8"),
        Some(rxing::BarcodeFormat::QR_CODE),
    )
    .expect("decoder should read back the rendered symbol");
    result.getText().to_string()
}

#[test]
fn monochrome_dib_round_trips_short_text() {
    let text = "Hello, world!";
    let mut syms =
        Symbols::new(ErrorCorrectionLevel::Medium, 40, false, ByteModeCharset::Iso8859_1).unwrap();
    syms.append_string(text).unwrap();
    let symbol = syms.get(0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qr.bmp");
    qr_dib::save_1bpp_dib(&symbol, 8, "#000000", "#FFFFFF", &path).unwrap();

    assert_eq!(text, decode_bmp(&path));
}

#[test]
fn colour_24bpp_dib_round_trips_alphanumeric_text() {
    let text = "HELLO WORLD";
    let mut syms =
        Symbols::new(ErrorCorrectionLevel::Quartile, 40, false, ByteModeCharset::Iso8859_1)
            .unwrap();
    syms.append_string(text).unwrap();
    let symbol = syms.get(0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qr24.bmp");
    qr_dib::save_24bpp_dib(&symbol, 8, "#000000", "#FFFFFF", &path).unwrap();

    assert_eq!(text, decode_bmp(&path));
}

#[test]
fn numeric_dib_round_trips_at_low_magnification() {
    let text = "0123456789";
    let mut syms =
        Symbols::new(ErrorCorrectionLevel::High, 40, false, ByteModeCharset::Iso8859_1).unwrap();
    syms.append_string(text).unwrap();
    let symbol = syms.get(0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qrnum.bmp");
    qr_dib::save_1bpp_dib(&symbol, 4, "#000000", "#FFFFFF", &path).unwrap();

    assert_eq!(text, decode_bmp(&path));
}
